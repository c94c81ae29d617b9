use super::{Using, Value};

use indexmap::IndexMap;

/// Column assignments for a partial update, keyed by column name.
///
/// Assignments keep insertion order, so the generated `SET` list is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments {
    assignments: IndexMap<String, UpdateValue>,
    using: Using,
}

/// The right-hand side of one assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateValue {
    /// Replace a scalar column's value.
    Set(Value),

    /// Add to or subtract from a counter column.
    Counter(CounterOp, i64),

    /// Apply a delta to a collection column.
    Collection(Delta, Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterOp {
    Incr,
    Decr,
}

/// How a collection value is applied to the stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delta {
    /// Replace the collection.
    All,

    /// Append list elements, union set elements or put map entries.
    Add,

    /// Remove list or set elements, or map entries by key.
    Remove,
}

impl Assignments {
    pub fn new() -> Assignments {
        Assignments::default()
    }

    /// Sets the `USING TTL ... AND TIMESTAMP ...` parameters.
    pub fn using(mut self, using: Using) -> Self {
        self.using = using;
        self
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, UpdateValue::Set(value.into()));
        self
    }

    pub fn incr(mut self, column: impl Into<String>, amount: i64) -> Self {
        self.insert(column, UpdateValue::Counter(CounterOp::Incr, amount));
        self
    }

    pub fn decr(mut self, column: impl Into<String>, amount: i64) -> Self {
        self.insert(column, UpdateValue::Counter(CounterOp::Decr, amount));
        self
    }

    pub fn replace(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, UpdateValue::Collection(Delta::All, value.into()));
        self
    }

    pub fn add(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, UpdateValue::Collection(Delta::Add, value.into()));
        self
    }

    pub fn remove(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, UpdateValue::Collection(Delta::Remove, value.into()));
        self
    }

    /// Adds or replaces the assignment for `column`.
    pub fn insert(&mut self, column: impl Into<String>, value: UpdateValue) {
        self.assignments.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&UpdateValue> {
        self.assignments.get(column)
    }

    pub fn using_params(&self) -> &Using {
        &self.using
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UpdateValue)> {
        self.assignments
            .iter()
            .map(|(column, value)| (column.as_str(), value))
    }
}

impl CounterOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CounterOp::Incr => "+",
            CounterOp::Decr => "-",
        }
    }
}

impl Delta {
    /// Parses a delta tag: `all`, `add` or `remove`.
    pub fn from_name(name: &str) -> Option<Delta> {
        match name.to_ascii_lowercase().as_str() {
            "all" => Some(Delta::All),
            "add" => Some(Delta::Add),
            "remove" => Some(Delta::Remove),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_assignment_replaces_earlier() {
        let assignments = Assignments::new()
            .set("name", "a")
            .incr("visits", 1)
            .set("name", "b");

        assert_eq!(assignments.len(), 2);
        assert_eq!(
            assignments.get("name"),
            Some(&UpdateValue::Set(Value::from("b")))
        );
        let columns: Vec<_> = assignments.iter().map(|(column, _)| column).collect();
        assert_eq!(columns, ["name", "visits"]);
    }
}
