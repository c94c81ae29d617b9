use super::{Comma, Formatter, Ident, ToCql};

use crate::stmt::{self, AssignmentExpr};

impl ToCql for &stmt::Statement {
    fn to_cql(self, f: &mut Formatter<'_>) {
        match self {
            stmt::Statement::CreateIndex(stmt) => stmt.to_cql(f),
            stmt::Statement::CreateKeyspace(stmt) => stmt.to_cql(f),
            stmt::Statement::CreateTable(stmt) => stmt.to_cql(f),
            stmt::Statement::Delete(stmt) => stmt.to_cql(f),
            stmt::Statement::DropKeyspace(stmt) => stmt.to_cql(f),
            stmt::Statement::DropTable(stmt) => stmt.to_cql(f),
            stmt::Statement::Insert(stmt) => stmt.to_cql(f),
            stmt::Statement::Select(stmt) => stmt.to_cql(f),
            stmt::Statement::Update(stmt) => stmt.to_cql(f),
        }
    }
}

impl ToCql for &stmt::CreateKeyspace {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let name = &self.name;
        let class = &self.replication.class;

        fmt!(
            f, "CREATE KEYSPACE " if_not_exists name
            " WITH REPLICATION = { 'class' : '" class "', 'replication_factor' : "
            self.replication.replication_factor " }"
        );
    }
}

impl ToCql for &stmt::DropKeyspace {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let name = &self.name;
        fmt!(f, "DROP KEYSPACE " if_exists name);
    }
}

struct ColumnsWithConstraints<'a>(&'a stmt::CreateTable);

struct PrimaryKey<'a>(&'a stmt::CreateTable);

impl ToCql for &stmt::CreateTable {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let name = &self.name;
        let columns = ColumnsWithConstraints(self);

        fmt!(f, "CREATE TABLE " if_not_exists name " (" columns ")");

        if !self.clustering_order.is_empty() {
            let order = Comma(
                self.clustering_order
                    .iter()
                    .map(|(column, direction)| ColumnOrder(column, *direction)),
            );
            fmt!(f, " WITH CLUSTERING ORDER BY (" order ")");
        }
    }
}

impl ToCql for ColumnsWithConstraints<'_> {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let columns = Comma(&self.0.columns);
        let pk = PrimaryKey(self.0);

        fmt!(f, columns ", PRIMARY KEY (" pk ")");
    }
}

/// `id`, `(a, b)`, `id, c` or `(a, b), c, d`
impl ToCql for PrimaryKey<'_> {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let partition = Comma(self.0.partition_key.iter().map(Ident));

        if self.0.partition_key.len() > 1 {
            fmt!(f, "(" partition ")");
        } else {
            fmt!(f, partition);
        }

        for column in &self.0.clustering_key {
            fmt!(f, ", " Ident(column));
        }
    }
}

impl ToCql for &stmt::ColumnDef {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let name = Ident(&self.name);
        let ty = &self.ty;
        fmt!(f, name " " ty);
    }
}

struct ColumnOrder<'a>(&'a String, stmt::Direction);

impl ToCql for ColumnOrder<'_> {
    fn to_cql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(self.0) " " self.1);
    }
}

impl ToCql for &stmt::CreateIndex {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let index_name = Ident(&self.name);
        let table = &self.on;
        let column = Ident(&self.column);

        fmt!(
            f, "CREATE INDEX " if_not_exists index_name " ON " table " (" column ")"
        );
    }
}

impl ToCql for &stmt::DropTable {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        let name = &self.name;
        fmt!(f, "DROP TABLE " if_exists name);
    }
}

impl ToCql for &stmt::Insert {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let table = &self.table;
        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(&self.values);
        let using = &self.using;

        fmt!(
            f, "INSERT INTO " table " (" columns ") VALUES (" values ")" using
        );
    }
}

impl ToCql for &stmt::Update {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let table = &self.table;
        let using = &self.using;
        let assignments = Comma(&self.assignments);
        let filter = &self.filter;

        fmt!(
            f, "UPDATE " table using " SET " assignments filter
        );
    }
}

impl ToCql for &stmt::Assignment {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let column = &self.column;

        match &self.expr {
            AssignmentExpr::Value(value) => fmt!(f, Ident(column) " = " value),
            AssignmentExpr::Add(value) => {
                fmt!(f, Ident(column) " = " Ident(column) " + " value)
            }
            AssignmentExpr::Sub(value) => {
                fmt!(f, Ident(column) " = " Ident(column) " - " value)
            }
        }
    }
}

impl ToCql for &stmt::Delete {
    fn to_cql(self, f: &mut Formatter<'_>) {
        fmt!(f, "DELETE ");

        if !self.columns.is_empty() {
            let columns = Comma(self.columns.iter().map(Ident));
            fmt!(f, columns " ");
        }

        let table = &self.table;
        let filter = &self.filter;
        fmt!(f, "FROM " table filter);
    }
}

impl ToCql for &stmt::Select {
    fn to_cql(self, f: &mut Formatter<'_>) {
        let columns = Comma(self.columns.iter().map(Ident));
        let table = &self.table;
        let filter = &self.filter;

        fmt!(f, "SELECT " columns " FROM " table filter);

        if !self.group_by.is_empty() {
            let group_by = Comma(self.group_by.iter().map(Ident));
            fmt!(f, " GROUP BY " group_by);
        }

        if !self.order_by.is_empty() {
            let order_by = Comma(
                self.order_by
                    .iter()
                    .map(|(column, direction)| ColumnOrder(column, *direction)),
            );
            fmt!(f, " ORDER BY " order_by);
        }

        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT " limit);
        }

        if self.allow_filtering {
            fmt!(f, " ALLOW FILTERING");
        }
    }
}
