use cqlmap_cql::stmt::Replication;

use serde::{Deserialize, Serialize};

/// Settings for a [`Db`](super::Db).
///
/// Every field has a default, so partial documents deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyspace returned by `Db::default_keyspace`
    pub keyspace: Option<String>,

    /// Replication for keyspaces created through the `Db`
    pub replication: ReplicationConfig,

    /// Rows per page for `Table::list` when the call sets none
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicationConfig {
    pub class: String,
    pub replication_factor: u32,
}

impl ReplicationConfig {
    pub fn to_replication(&self) -> Replication {
        Replication {
            class: self.class.clone(),
            replication_factor: self.replication_factor,
        }
    }
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        let Replication {
            class,
            replication_factor,
        } = Replication::default();

        ReplicationConfig {
            class,
            replication_factor,
        }
    }
}
