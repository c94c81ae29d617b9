use super::{Config, Db};

use cqlmap_core::{bail, Error, Executor, Result};

use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Replaces every setting with `config`.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Sets the keyspace returned by `Db::default_keyspace`.
    pub fn keyspace(&mut self, name: impl Into<String>) -> &mut Self {
        self.config.keyspace = Some(name.into());
        self
    }

    pub fn replication_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.config.replication.class = class.into();
        self
    }

    pub fn replication_factor(&mut self, replication_factor: u32) -> &mut Self {
        self.config.replication.replication_factor = replication_factor;
        self
    }

    /// Sets the default number of rows per listed page.
    pub fn page_size(&mut self, page_size: u32) -> &mut Self {
        self.config.page_size = Some(page_size);
        self
    }

    pub fn build(&self, executor: impl Executor) -> Result<Db> {
        if let Some(name) = &self.config.keyspace {
            if let Err(reason) = crate::keyspace::identifier(name) {
                return Err(Error::invalid_keyspace(name, reason));
            }
        }

        if self.config.replication.replication_factor == 0 {
            bail!("replication factor must be at least 1");
        }

        if self.config.page_size == Some(0) {
            bail!("page size must be at least 1");
        }

        Ok(Db::new(Arc::new(executor), self.config.clone()))
    }
}
