use super::{Name, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateKeyspace {
    /// Name of the keyspace
    pub name: Name,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,

    pub replication: Replication,
}

/// Replication settings for a new keyspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replication {
    /// Replication strategy class, `SimpleStrategy` by default
    pub class: String,

    pub replication_factor: u32,
}

impl Statement {
    /// Creates a keyspace.
    ///
    /// The caller checks for an existing keyspace first; no `IF NOT EXISTS`
    /// clause is added.
    pub fn create_keyspace(name: &str, replication: Replication) -> Self {
        CreateKeyspace {
            name: Name::from(name),
            if_not_exists: false,
            replication,
        }
        .into()
    }
}

impl Default for Replication {
    fn default() -> Self {
        Replication {
            class: "SimpleStrategy".to_string(),
            replication_factor: 1,
        }
    }
}

impl From<CreateKeyspace> for Statement {
    fn from(value: CreateKeyspace) -> Self {
        Self::CreateKeyspace(value)
    }
}
