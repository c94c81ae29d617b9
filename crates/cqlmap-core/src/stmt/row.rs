use super::Value;

use indexmap::IndexMap;

/// One result row, as returned by an executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Values in the order of the selected columns
    Positional(Vec<Value>),

    /// Values keyed by column name
    Named(IndexMap<String, Value>),
}

impl Row {
    pub fn len(&self) -> usize {
        match self {
            Row::Positional(values) => values.len(),
            Row::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value for `column`. Positional rows have no names and
    /// always return `None`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        match self {
            Row::Positional(_) => None,
            Row::Named(values) => values.get(column),
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Row::Positional(values) => values.get(index),
            Row::Named(values) => values.get_index(index).map(|(_, value)| value),
        }
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Row {
        Row::Positional(values)
    }
}

impl From<IndexMap<String, Value>> for Row {
    fn from(values: IndexMap<String, Value>) -> Row {
        Row::Named(values)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Row {
        Row::Named(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
