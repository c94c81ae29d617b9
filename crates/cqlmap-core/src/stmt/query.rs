use super::{Direction, WhereClause};

/// What to read from a table: the projection, filter, grouping, ordering
/// and limit of a `SELECT`.
///
/// An empty projection selects every entity column, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub columns: Vec<String>,
    pub filter: Vec<WhereClause>,
    pub group_by: Vec<String>,
    pub order_by: Vec<(String, Direction)>,
    pub limit: Option<u64>,
    pub allow_filtering: bool,
}

impl Query {
    pub fn all() -> Query {
        Query::default()
    }

    pub fn filter(filter: impl IntoIterator<Item = WhereClause>) -> Query {
        Query {
            filter: filter.into_iter().collect(),
            ..Query::default()
        }
    }

    pub fn select<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn and(mut self, clause: WhereClause) -> Self {
        self.filter.push(clause);
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.push(column.into());
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn allow_filtering(mut self) -> Self {
        self.allow_filtering = true;
        self
    }
}
