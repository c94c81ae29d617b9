use crate::table::Table;

use cqlmap_core::{
    bail,
    schema::{ColumnType, Type},
    stmt::Value,
    Result,
};
use cqlmap_cql::{
    stmt::{ColumnDef, CreateTable, Direction, Name, Replication, Select},
    Statement,
};

use indexmap::IndexMap;

/// Every keyspace and table the executor knows about.
#[derive(Debug, Default)]
pub(crate) struct Store {
    keyspaces: IndexMap<String, Keyspace>,
}

#[derive(Debug)]
struct Keyspace {
    replication: Replication,
    tables: IndexMap<String, Table>,
}

impl Store {
    pub(crate) fn execute(&mut self, stmt: Statement) -> Result<()> {
        match stmt {
            Statement::CreateKeyspace(stmt) => {
                let name = single(&stmt.name)?;

                if self.keyspaces.contains_key(&name) {
                    if stmt.if_not_exists {
                        return Ok(());
                    }
                    bail!("keyspace `{name}` already exists");
                }

                self.keyspaces.insert(
                    name,
                    Keyspace {
                        replication: stmt.replication,
                        tables: IndexMap::new(),
                    },
                );
            }
            Statement::DropKeyspace(stmt) => {
                let name = single(&stmt.name)?;

                if self.keyspaces.shift_remove(&name).is_none() && !stmt.if_exists {
                    bail!("keyspace `{name}` does not exist");
                }
            }
            Statement::CreateTable(stmt) => {
                let (keyspace, table) = qualified(&stmt.name)?;
                let keyspace = self.keyspace_mut(&keyspace)?;

                if keyspace.tables.contains_key(&table) {
                    if stmt.if_not_exists {
                        return Ok(());
                    }
                    bail!("table `{table}` already exists");
                }

                keyspace.tables.insert(table, Table::new(stmt)?);
            }
            Statement::DropTable(stmt) => {
                let (keyspace, table) = qualified(&stmt.name)?;
                let keyspace = self.keyspace_mut(&keyspace)?;

                if keyspace.tables.shift_remove(&table).is_none() && !stmt.if_exists {
                    bail!("table `{table}` does not exist");
                }
            }
            Statement::CreateIndex(stmt) => {
                let table = self.table_mut(&stmt.on)?;
                table.create_index(&stmt.name, &stmt.column, stmt.if_not_exists)?;
            }
            Statement::Insert(stmt) => self.table_mut(&stmt.table)?.insert(&stmt)?,
            Statement::Update(stmt) => self.table_mut(&stmt.table)?.update(&stmt)?,
            Statement::Delete(stmt) => self.table_mut(&stmt.table)?.delete(&stmt)?,
            Statement::Select(stmt) => {
                self.select(&stmt)?;
            }
        }

        Ok(())
    }

    pub(crate) fn select(&self, select: &Select) -> Result<Vec<IndexMap<String, Value>>> {
        let (keyspace, table) = qualified(&select.table)?;

        if keyspace == "system_schema" {
            return self.system_table(&table)?.select(select);
        }

        self.table(&keyspace, &table)?.select(select)
    }

    pub(crate) fn row_count(&self, keyspace: &str, table: &str) -> Option<usize> {
        self.keyspaces
            .get(keyspace)?
            .tables
            .get(table)
            .map(Table::len)
    }

    pub(crate) fn replication(&self, keyspace: &str) -> Option<&Replication> {
        self.keyspaces.get(keyspace).map(|ks| &ks.replication)
    }

    /// Materializes `system_schema.keyspaces` or `system_schema.tables`.
    fn system_table(&self, name: &str) -> Result<Table> {
        let text = || ColumnType::Scalar(Type::Text);

        let (columns, rows): (Vec<&str>, Vec<Vec<&str>>) = match name {
            "keyspaces" => (
                vec!["keyspace_name"],
                self.keyspaces.keys().map(|ks| vec![ks.as_str()]).collect(),
            ),
            "tables" => (
                vec!["keyspace_name", "table_name"],
                self.keyspaces
                    .iter()
                    .flat_map(|(ks, keyspace)| {
                        keyspace
                            .tables
                            .keys()
                            .map(move |table| vec![ks.as_str(), table.as_str()])
                    })
                    .collect(),
            ),
            _ => bail!("unconfigured table `system_schema.{name}`"),
        };

        let mut table = Table::new(CreateTable {
            name: Name::qualified("system_schema", name),
            if_not_exists: false,
            columns: columns
                .iter()
                .map(|column| ColumnDef {
                    name: column.to_string(),
                    ty: text(),
                })
                .collect(),
            partition_key: vec![columns[0].to_string()],
            clustering_key: columns[1..].iter().map(|c| c.to_string()).collect(),
            clustering_order: columns[1..]
                .iter()
                .map(|c| (c.to_string(), Direction::Asc))
                .collect(),
        })?;

        for row in rows {
            table.push_row(
                columns
                    .iter()
                    .zip(row)
                    .map(|(column, value)| (column.to_string(), Value::from(value)))
                    .collect(),
            );
        }

        Ok(table)
    }

    fn keyspace_mut(&mut self, name: &str) -> Result<&mut Keyspace> {
        match self.keyspaces.get_mut(name) {
            Some(keyspace) => Ok(keyspace),
            None => bail!("keyspace `{name}` does not exist"),
        }
    }

    fn table(&self, keyspace: &str, table: &str) -> Result<&Table> {
        let Some(ks) = self.keyspaces.get(keyspace) else {
            bail!("keyspace `{keyspace}` does not exist");
        };

        match ks.tables.get(table) {
            Some(table) => Ok(table),
            None => bail!("unconfigured table `{keyspace}.{table}`"),
        }
    }

    fn table_mut(&mut self, name: &Name) -> Result<&mut Table> {
        let (keyspace, table) = qualified(name)?;
        let ks = self.keyspace_mut(&keyspace)?;

        match ks.tables.get_mut(&table) {
            Some(table) => Ok(table),
            None => bail!("unconfigured table `{keyspace}.{table}`"),
        }
    }
}

/// Unquoted identifiers are case-insensitive.
fn single(name: &Name) -> Result<String> {
    match &name.0[..] {
        [name] => Ok(name.to_ascii_lowercase()),
        _ => bail!("expected an unqualified name, found `{name}`"),
    }
}

fn qualified(name: &Name) -> Result<(String, String)> {
    match &name.0[..] {
        [keyspace, table] => Ok((keyspace.to_ascii_lowercase(), table.to_ascii_lowercase())),
        [_] => bail!("no keyspace has been specified for `{name}`"),
        _ => bail!("invalid table name `{name}`"),
    }
}
