use crate::value;

use cqlmap_core::{
    bail,
    schema::{CollectionKind, CollectionType, ColumnType, Type},
    stmt::{Direction, Relation, Value},
    Result,
};
use cqlmap_cql::{
    parse,
    stmt::{AssignmentExpr, CreateTable, Delete, Filter, Insert, Operand, Select, Update},
    Literal,
};

use indexmap::IndexMap;
use std::cmp::Ordering;

type Values = IndexMap<String, Value>;

static NULL: Value = Value::Null;

/// One table's definition and rows. Column names are stored lowercased.
#[derive(Debug)]
pub(crate) struct Table {
    columns: IndexMap<String, ColumnType>,
    partition_key: Vec<String>,
    clustering_key: Vec<String>,

    /// Direction of each clustering column, in clustering key order
    clustering_order: Vec<Direction>,

    /// Index name → indexed column
    indexes: IndexMap<String, String>,

    rows: Vec<Values>,
}

/// A `WHERE` condition with its operand read as typed values.
struct Predicate {
    column: String,
    relation: Relation,
    operand: Vec<Value>,
}

impl Table {
    pub(crate) fn new(stmt: CreateTable) -> Result<Table> {
        let mut columns = IndexMap::new();

        for def in stmt.columns {
            let name = def.name.to_ascii_lowercase();
            if columns.insert(name.clone(), def.ty).is_some() {
                bail!("multiple definitions for column `{name}`");
            }
        }

        let lowercase = |names: Vec<String>| -> Vec<String> {
            names.into_iter().map(|name| name.to_ascii_lowercase()).collect()
        };

        let partition_key = lowercase(stmt.partition_key);
        let clustering_key = lowercase(stmt.clustering_key);

        if partition_key.is_empty() {
            bail!("no PRIMARY KEY specified for `{}`", stmt.name);
        }

        for key in partition_key.iter().chain(&clustering_key) {
            match columns.get(key) {
                None => bail!("unknown definition `{key}` referenced in PRIMARY KEY"),
                Some(ColumnType::Collection(_)) => {
                    bail!("invalid collection type for PRIMARY KEY component `{key}`")
                }
                Some(ColumnType::Scalar(Type::Counter)) => {
                    bail!("counter type is not supported for PRIMARY KEY column `{key}`")
                }
                Some(_) => {}
            }
        }

        for (column, _) in &stmt.clustering_order {
            if !clustering_key.iter().any(|ck| ck.eq_ignore_ascii_case(column)) {
                bail!("missing CLUSTERING ORDER for column `{column}`");
            }
        }

        let clustering_order = clustering_key
            .iter()
            .map(|ck| {
                stmt.clustering_order
                    .iter()
                    .find(|(column, _)| column.eq_ignore_ascii_case(ck))
                    .map(|(_, direction)| *direction)
                    .unwrap_or(Direction::Asc)
            })
            .collect();

        let table = Table {
            columns,
            partition_key,
            clustering_key,
            clustering_order,
            indexes: IndexMap::new(),
            rows: vec![],
        };

        if table.has_counters()
            && table
                .columns
                .iter()
                .any(|(name, ty)| !table.is_key(name) && !value::is_counter(ty))
        {
            bail!("cannot mix counter and non counter columns in the same table");
        }

        Ok(table)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn push_row(&mut self, row: Values) {
        self.rows.push(row);
    }

    pub(crate) fn create_index(&mut self, name: &str, column: &str, if_not_exists: bool) -> Result<()> {
        let (column, _) = self.column(column)?;
        let column = column.to_string();
        let name = name.to_ascii_lowercase();

        if self.indexes.contains_key(&name) {
            if if_not_exists {
                return Ok(());
            }
            bail!("index `{name}` already exists");
        }

        self.indexes.insert(name, column);
        Ok(())
    }

    pub(crate) fn insert(&mut self, stmt: &Insert) -> Result<()> {
        if self.has_counters() {
            bail!("INSERT statements are not allowed on counter tables, use UPDATE instead");
        }

        if stmt.columns.len() != stmt.values.len() {
            bail!("unmatched column names/values");
        }

        let mut values = Values::new();

        for (column, literal) in stmt.columns.iter().zip(&stmt.values) {
            let (name, ty) = self.column(column)?;
            let value = read(literal, ty)?;

            if values.insert(name.to_string(), value).is_some() {
                bail!("multiple definitions found for column `{name}`");
            }
        }

        let key = self.key_of(&values)?;

        match self.position(&key) {
            Some(index) => self.rows[index].extend(values),
            None => self.rows.push(values),
        }

        Ok(())
    }

    pub(crate) fn update(&mut self, stmt: &Update) -> Result<()> {
        let mut key_values = Values::new();

        for condition in &stmt.filter.0 {
            let (name, ty) = self.column(&condition.column)?;

            if !self.is_key(name) {
                bail!("non PRIMARY KEY column `{name}` found in WHERE clause of UPDATE");
            }

            match (&condition.relation, &condition.operand) {
                (Relation::Eq, Operand::Literal(literal)) => {
                    key_values.insert(name.to_string(), read(literal, ty)?);
                }
                (relation, _) => bail!("only `=` is supported on `{name}` in UPDATE, found {relation}"),
            }
        }

        let key = self.key_of(&key_values)?;
        let index = self.position(&key);

        let mut changes = Vec::with_capacity(stmt.assignments.len());

        for assignment in &stmt.assignments {
            let (name, ty) = self.column(&assignment.column)?;

            if self.is_key(name) {
                bail!("PRIMARY KEY part `{name}` found in SET part");
            }

            let current = index
                .and_then(|index| self.rows[index].get(name))
                .cloned()
                .unwrap_or(Value::Null);

            let next = match &assignment.expr {
                AssignmentExpr::Value(_) if value::is_counter(ty) => bail!(
                    "cannot set the value of counter column `{name}` (counters can only be incremented/decremented, not set)"
                ),
                AssignmentExpr::Value(literal) => read(literal, ty)?,
                AssignmentExpr::Add(_) | AssignmentExpr::Sub(_)
                    if matches!(ty, ColumnType::Scalar(_)) && !value::is_counter(ty) =>
                {
                    bail!("invalid operation for non counter column `{name}`")
                }
                AssignmentExpr::Add(literal) => value::add(name, ty, current, read(literal, ty)?)?,
                AssignmentExpr::Sub(literal) => {
                    value::sub(name, ty, current, read(literal, &removal_ty(ty))?)?
                }
            };

            changes.push((name.to_string(), next));
        }

        let row = match index {
            Some(index) => &mut self.rows[index],
            None => {
                self.rows.push(key_values);
                let last = self.rows.len() - 1;
                &mut self.rows[last]
            }
        };

        row.extend(changes);
        Ok(())
    }

    pub(crate) fn delete(&mut self, stmt: &Delete) -> Result<()> {
        if stmt.filter.is_empty() {
            bail!("DELETE requires a WHERE clause");
        }

        let predicates = self.predicates(&stmt.filter)?;

        let columns = stmt
            .columns
            .iter()
            .map(|column| {
                let (name, _) = self.column(column)?;
                if self.is_key(name) {
                    bail!("invalid identifier `{name}` for deletion (should not be a PRIMARY KEY part)");
                }
                Ok(name.to_string())
            })
            .collect::<Result<Vec<_>>>()?;

        if columns.is_empty() {
            self.rows.retain(|row| !matches_all(&predicates, row));
            return Ok(());
        }

        for row in self.rows.iter_mut().filter(|row| matches_all(&predicates, row)) {
            for column in &columns {
                row.insert(column.clone(), Value::Null);
            }
        }

        Ok(())
    }

    pub(crate) fn select(&self, select: &Select) -> Result<Vec<Values>> {
        let projection = if select.columns.len() == 1 && select.columns[0] == "*" {
            self.columns.keys().cloned().collect()
        } else {
            self.resolve(&select.columns)?
        };

        let predicates = self.predicates(&select.filter)?;

        if !select.allow_filtering {
            if let Some(predicate) = predicates
                .iter()
                .find(|p| !self.is_key(&p.column) && !self.is_indexed(&p.column))
            {
                bail!(
                    "cannot execute this query as it might involve data filtering on `{}`; use ALLOW FILTERING",
                    predicate.column
                );
            }
        }

        let mut rows = self
            .ordered_rows()
            .into_iter()
            .filter(|row| matches_all(&predicates, row))
            .collect::<Vec<_>>();

        if !select.order_by.is_empty() {
            let order = select
                .order_by
                .iter()
                .map(|(column, direction)| Ok((self.column(column)?.0, *direction)))
                .collect::<Result<Vec<_>>>()?;

            rows.sort_by(|a, b| {
                order
                    .iter()
                    .map(|(column, direction)| directed(cell(a, column), cell(b, column), *direction))
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        if !select.group_by.is_empty() {
            let group = self.resolve(&select.group_by)?;
            let mut seen: Vec<Vec<Value>> = vec![];

            rows.retain(|row| {
                let key = group.iter().map(|c| cell(row, c).clone()).collect::<Vec<_>>();
                if seen.contains(&key) {
                    false
                } else {
                    seen.push(key);
                    true
                }
            });
        }

        if let Some(limit) = select.limit {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                projection
                    .iter()
                    .map(|column| (column.clone(), cell(row, column).clone()))
                    .collect()
            })
            .collect())
    }

    /// Rows grouped by partition, in first-write order, and sorted by
    /// clustering columns within each partition.
    fn ordered_rows(&self) -> Vec<&Values> {
        let mut partitions: Vec<(Vec<&Value>, Vec<&Values>)> = vec![];

        for row in &self.rows {
            let key = self
                .partition_key
                .iter()
                .map(|c| cell(row, c))
                .collect::<Vec<_>>();

            match partitions.iter_mut().find(|(k, _)| *k == key) {
                Some((_, rows)) => rows.push(row),
                None => partitions.push((key, vec![row])),
            }
        }

        partitions
            .into_iter()
            .flat_map(|(_, mut rows)| {
                rows.sort_by(|a, b| self.compare_clustering(a, b));
                rows
            })
            .collect()
    }

    fn compare_clustering(&self, a: &Values, b: &Values) -> Ordering {
        self.clustering_key
            .iter()
            .zip(&self.clustering_order)
            .map(|(column, direction)| directed(cell(a, column), cell(b, column), *direction))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    fn predicates(&self, filter: &Filter) -> Result<Vec<Predicate>> {
        filter
            .0
            .iter()
            .map(|condition| {
                let (name, ty) = self.column(&condition.column)?;

                let operand_ty = match (condition.relation, ty) {
                    (Relation::Contains, ColumnType::Collection(collection)) => {
                        ColumnType::Scalar(collection.value.clone())
                    }
                    (Relation::Contains, _) => {
                        bail!("cannot use CONTAINS on non-collection column `{name}`")
                    }
                    (Relation::ContainsKey, ColumnType::Collection(collection))
                        if collection.kind == CollectionKind::Map =>
                    {
                        ColumnType::Scalar(collection.key.clone().unwrap_or(Type::Text))
                    }
                    (Relation::ContainsKey, _) => {
                        bail!("cannot use CONTAINS KEY on non-map column `{name}`")
                    }
                    _ => ty.clone(),
                };

                let operand = match &condition.operand {
                    Operand::Literal(literal) => vec![read(literal, &operand_ty)?],
                    Operand::List(items) => items
                        .iter()
                        .map(|literal| read(literal, &operand_ty))
                        .collect::<Result<_>>()?,
                };

                Ok(Predicate {
                    column: name.to_string(),
                    relation: condition.relation,
                    operand,
                })
            })
            .collect()
    }

    fn resolve(&self, columns: &[String]) -> Result<Vec<String>> {
        columns
            .iter()
            .map(|column| Ok(self.column(column)?.0.to_string()))
            .collect()
    }

    fn column(&self, name: &str) -> Result<(&str, &ColumnType)> {
        match self.columns.get_key_value(&name.to_ascii_lowercase()) {
            Some((name, ty)) => Ok((name, ty)),
            None => bail!("undefined column name `{name}`"),
        }
    }

    /// Values of the primary key columns, which must all be set.
    fn key_of(&self, values: &Values) -> Result<Vec<Value>> {
        self.key_columns()
            .map(|column| match values.get(column) {
                Some(value) if !value.is_null() => Ok(value.clone()),
                Some(_) => bail!("invalid null value for PRIMARY KEY column `{column}`"),
                None => bail!("some PRIMARY KEY parts are missing: `{column}`"),
            })
            .collect()
    }

    fn position(&self, key: &[Value]) -> Option<usize> {
        self.rows.iter().position(|row| {
            self.key_columns()
                .zip(key)
                .all(|(column, value)| row.get(column) == Some(value))
        })
    }

    fn key_columns(&self) -> impl Iterator<Item = &String> {
        self.partition_key.iter().chain(&self.clustering_key)
    }

    fn is_key(&self, column: &str) -> bool {
        self.key_columns().any(|key| key == column)
    }

    fn is_indexed(&self, column: &str) -> bool {
        self.indexes.values().any(|indexed| indexed == column)
    }

    fn has_counters(&self) -> bool {
        self.columns.values().any(value::is_counter)
    }
}

impl Predicate {
    fn matches(&self, value: &Value) -> bool {
        let Some(operand) = self.operand.first() else {
            return false;
        };

        match self.relation {
            Relation::Eq => value == operand,
            Relation::Ne => value != operand,
            Relation::Lt => in_range(value, operand, |ord| ord.is_lt()),
            Relation::Le => in_range(value, operand, |ord| ord.is_le()),
            Relation::Gt => in_range(value, operand, |ord| ord.is_gt()),
            Relation::Ge => in_range(value, operand, |ord| ord.is_ge()),
            Relation::In => self.operand.contains(value),
            Relation::Contains => match value {
                Value::List(items) | Value::Set(items) => items.contains(operand),
                Value::Map(entries) => entries.iter().any(|(_, v)| v == operand),
                _ => false,
            },
            Relation::ContainsKey => match value {
                Value::Map(entries) => entries.iter().any(|(k, _)| k == operand),
                _ => false,
            },
        }
    }
}

fn in_range(value: &Value, bound: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    !value.is_null() && accept(value::compare(value, bound))
}

fn matches_all(predicates: &[Predicate], row: &Values) -> bool {
    predicates
        .iter()
        .all(|predicate| predicate.matches(cell(row, &predicate.column)))
}

fn cell<'a>(row: &'a Values, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&NULL)
}

fn directed(a: &Value, b: &Value, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => value::compare(a, b),
        Direction::Desc => value::compare(b, a),
    }
}

fn read(literal: &Literal, ty: &ColumnType) -> Result<Value> {
    parse::value(literal, ty).map(value::normalize)
}

/// Map deltas remove entries by key, so their operand is a set of keys.
fn removal_ty(ty: &ColumnType) -> ColumnType {
    match ty {
        ColumnType::Collection(collection) if collection.kind == CollectionKind::Map => {
            ColumnType::Collection(CollectionType::set(
                collection.key.clone().unwrap_or(Type::Text),
            ))
        }
        ty => ty.clone(),
    }
}
