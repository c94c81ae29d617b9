use super::{Direction, Filter, Name, Query, Statement};

use cqlmap_core::{schema::Entity, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    /// Projected columns
    pub columns: Vec<String>,

    /// Table to read from
    pub table: Name,

    pub filter: Filter,

    pub group_by: Vec<String>,

    pub order_by: Vec<(String, Direction)>,

    pub limit: Option<u64>,

    pub allow_filtering: bool,
}

impl Statement {
    /// Reads from the table backing `entity`.
    ///
    /// An empty projection selects every entity column in declaration order.
    /// The filter may be empty.
    pub fn select(table: Name, entity: &Entity, query: &Query) -> Result<Self> {
        let resolve = |name: &String| {
            entity
                .column(name)
                .map(|column| column.name.clone())
                .ok_or_else(|| Error::unknown_target_column(name))
        };

        let columns = if query.columns.is_empty() {
            entity
                .columns()
                .iter()
                .map(|column| column.name.clone())
                .collect()
        } else {
            query.columns.iter().map(resolve).collect::<Result<_>>()?
        };

        Ok(Select {
            columns,
            table,
            filter: Filter::compile(entity, &query.filter)?,
            group_by: query.group_by.iter().map(resolve).collect::<Result<_>>()?,
            order_by: query
                .order_by
                .iter()
                .map(|(name, direction)| Ok((resolve(name)?, *direction)))
                .collect::<Result<_>>()?,
            limit: query.limit,
            allow_filtering: query.allow_filtering,
        }
        .into())
    }
}

impl Select {
    /// A projection over a table that is not entity-backed.
    pub(super) fn columns<S: Into<String>>(
        table: Name,
        columns: impl IntoIterator<Item = S>,
    ) -> Select {
        Select {
            columns: columns.into_iter().map(Into::into).collect(),
            table,
            filter: Filter::default(),
            group_by: vec![],
            order_by: vec![],
            limit: None,
            allow_filtering: false,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
