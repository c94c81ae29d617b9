use std::fmt;

/// A possibly qualified name, such as `keyspace.table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub Vec<String>);

impl Name {
    pub fn qualified(keyspace: impl Into<String>, name: impl Into<String>) -> Name {
        Name(vec![keyspace.into(), name.into()])
    }

    /// The last segment of the name.
    pub fn unqualified(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self(vec![value.into()])
    }
}

impl From<&String> for Name {
    fn from(value: &String) -> Self {
        Self::from(&value[..])
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for ident in &self.0 {
            write!(f, "{s}{ident}")?;
            s = ".";
        }

        Ok(())
    }
}
