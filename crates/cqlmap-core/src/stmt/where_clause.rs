use super::Value;

use std::fmt;

/// One `column <relation> value` condition. Conditions in a list are joined
/// with `AND`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub column: String,
    pub relation: Relation,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    Contains,
    ContainsKey,
}

impl WhereClause {
    pub fn new(column: impl Into<String>, relation: Relation, value: impl Into<Value>) -> Self {
        WhereClause {
            column: column.into(),
            relation,
            value: value.into(),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Relation::Eq, value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Relation::Ne, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Relation::Lt, value)
    }

    pub fn le(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Relation::Le, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Relation::Gt, value)
    }

    pub fn ge(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Relation::Ge, value)
    }

    /// `column IN (values...)`
    pub fn in_list<T: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(column, Relation::In, Value::list(values))
    }

    pub fn contains(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Relation::Contains, value)
    }

    pub fn contains_key(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Relation::ContainsKey, value)
    }
}

impl Relation {
    /// Parses the relation spelling used by callers, case-insensitively.
    pub fn from_name(name: &str) -> Option<Relation> {
        Some(match name.trim().to_ascii_uppercase().as_str() {
            "=" => Relation::Eq,
            "!=" => Relation::Ne,
            "<" => Relation::Lt,
            "<=" => Relation::Le,
            ">" => Relation::Gt,
            ">=" => Relation::Ge,
            "IN" => Relation::In,
            "CONTAINS" => Relation::Contains,
            "CONTAINS KEY" => Relation::ContainsKey,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Eq => "=",
            Relation::Ne => "!=",
            Relation::Lt => "<",
            Relation::Le => "<=",
            Relation::Gt => ">",
            Relation::Ge => ">=",
            Relation::In => "IN",
            Relation::Contains => "CONTAINS",
            Relation::ContainsKey => "CONTAINS KEY",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
