mod builder;
pub use builder::Builder;

mod config;
pub use config::{Config, ReplicationConfig};

use crate::{keyspace, session::Session, CreateOutcome, Keyspace};

use cqlmap_core::{Error, Executor, Result};
use cqlmap_cql::Statement;

use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

/// Entry point: an executor plus the keyspace handles opened through it.
///
/// Cloning is cheap; clones share keyspace handles, and with them the table
/// registries.
#[derive(Debug, Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    session: Session,
    config: Config,
    keyspaces: RwLock<HashMap<String, Keyspace>>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(executor: Arc<dyn Executor>, config: Config) -> Db {
        Db {
            shared: Arc::new(Shared {
                session: Session::new(executor),
                config,
                keyspaces: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    /// Returns the handle for keyspace `name` without contacting the store.
    pub fn keyspace(&self, name: &str) -> Result<Keyspace> {
        let name = keyspace_name(name)?;

        if let Some(keyspace) = self.shared.keyspaces.read().get(&name) {
            return Ok(keyspace.clone());
        }

        let mut keyspaces = self.shared.keyspaces.write();
        let keyspace = keyspaces.entry(name.clone()).or_insert_with(|| {
            Keyspace::new(
                name,
                self.shared.session.clone(),
                self.shared.config.page_size,
            )
        });

        Ok(keyspace.clone())
    }

    /// Returns the handle for the configured keyspace.
    pub fn default_keyspace(&self) -> Result<Keyspace> {
        match &self.shared.config.keyspace {
            Some(name) => self.keyspace(name),
            None => Err(Error::invalid_keyspace("", "no keyspace configured")),
        }
    }

    /// Creates keyspace `name` with the configured replication, unless the
    /// store already has it.
    pub async fn create_keyspace(&self, name: &str) -> Result<(Keyspace, CreateOutcome)> {
        let keyspace = self.keyspace(name)?;

        if self.keyspace_exists(keyspace.name()).await? {
            tracing::debug!(keyspace = %keyspace.name(), "keyspace already exists");
            return Ok((keyspace, CreateOutcome::AlreadyExists));
        }

        let replication = self.shared.config.replication.to_replication();
        tracing::info!(
            keyspace = %keyspace.name(),
            class = %replication.class,
            replication_factor = replication.replication_factor,
            "creating keyspace"
        );

        self.shared
            .session
            .execute(&Statement::create_keyspace(keyspace.name(), replication))
            .await?;

        Ok((keyspace, CreateOutcome::Created))
    }

    /// Drops keyspace `name` and forgets its handle.
    pub async fn drop_keyspace(&self, name: &str) -> Result<()> {
        let name = keyspace_name(name)?;

        self.shared
            .session
            .execute(&Statement::drop_keyspace(&name))
            .await?;

        self.shared.keyspaces.write().remove(&name);
        tracing::info!(keyspace = %name, "dropped keyspace");
        Ok(())
    }

    /// Keyspace names, as the store reports them.
    pub async fn keyspaces(&self) -> Result<Vec<String>> {
        self.shared
            .session
            .query_names(&Statement::list_keyspaces())
            .await
    }

    pub async fn keyspace_exists(&self, name: &str) -> Result<bool> {
        let name = keyspace_name(name)?;
        let names = self
            .shared
            .session
            .query_names(&Statement::keyspace_exists(&name))
            .await?;

        Ok(!names.is_empty())
    }
}

fn keyspace_name(name: &str) -> Result<String> {
    keyspace::identifier(name).map_err(|reason| Error::invalid_keyspace(name, reason))
}
