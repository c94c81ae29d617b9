use super::{Name, Record, Statement, Using};
use crate::Literal;

use cqlmap_core::{schema::Entity, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    /// Qualified name of the table
    pub table: Name,

    /// Inserted columns, in field declaration order
    pub columns: Vec<String>,

    /// One literal per column
    pub values: Vec<Literal>,

    pub using: Using,
}

impl Statement {
    /// Inserts every column of `record`.
    ///
    /// Values are read through each column's field ordinal and formatted with
    /// the column's declared type.
    pub fn insert(table: Name, entity: &Entity, record: &dyn Record, using: Using) -> Result<Self> {
        let mut columns = Vec::with_capacity(entity.columns().len());
        let mut values = Vec::with_capacity(entity.columns().len());

        for column in entity.columns() {
            let value = record
                .field(column.field_index)
                .ok_or_else(|| Error::field_unavailable(&column.field_name))?;

            columns.push(column.name.clone());
            values.push(Literal::for_column(column, &value)?);
        }

        Ok(Insert {
            table,
            columns,
            values,
            using,
        }
        .into())
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
