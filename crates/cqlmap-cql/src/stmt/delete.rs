use super::{Filter, Name, Statement, WhereClause};

use cqlmap_core::{schema::Entity, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    /// Columns to delete. Empty deletes the whole row.
    pub columns: Vec<String>,

    pub table: Name,

    pub filter: Filter,
}

impl Statement {
    /// Deletes `columns` (or whole rows, when `columns` is empty) from the
    /// rows matching `filter`.
    pub fn delete<S: AsRef<str>>(
        table: Name,
        entity: &Entity,
        columns: &[S],
        filter: &[WhereClause],
    ) -> Result<Self> {
        let columns = columns
            .iter()
            .map(|name| {
                entity
                    .column(name.as_ref())
                    .map(|column| column.name.clone())
                    .ok_or_else(|| Error::unknown_target_column(name.as_ref()))
            })
            .collect::<Result<_>>()?;

        let filter = Filter::compile_required(&table, entity, filter)?;

        Ok(Delete {
            columns,
            table,
            filter,
        }
        .into())
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
