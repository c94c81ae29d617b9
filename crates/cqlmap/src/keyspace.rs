use crate::{session::Session, Model, Table, TableSchema};

use cqlmap_core::{bail, Error, Result};
use cqlmap_cql::{stmt::Name, Statement};

use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

/// What a create call found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,

    /// The object existed already and was registered as is.
    AlreadyExists,
}

/// A keyspace and its registry of tables.
///
/// Handles are cheap to clone and share one registry. Registration and
/// removal take the registry's write lock; lookups take the read lock.
#[derive(Debug, Clone)]
pub struct Keyspace {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    name: String,
    session: Session,
    page_size: Option<u32>,
    tables: RwLock<HashMap<String, Arc<TableSchema>>>,
}

impl Keyspace {
    pub(crate) fn new(name: String, session: Session, page_size: Option<u32>) -> Keyspace {
        Keyspace {
            inner: Arc::new(Inner {
                name,
                session,
                page_size,
                tables: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Creates the table `name` for model `M`, with its secondary indexes,
    /// and registers it.
    ///
    /// A table that already exists in the store is registered with the
    /// entity compiled from `M` and reported as
    /// [`CreateOutcome::AlreadyExists`]; no statement is issued for it.
    pub async fn create_table<M: Model>(&self, name: &str) -> Result<(Table<M>, CreateOutcome)> {
        let name = table_name(name)?;
        let entity = M::entity()?;
        let schema = Arc::new(TableSchema {
            name: Name::qualified(self.name(), &name),
            entity,
        });

        if self.table_exists(&name).await? {
            tracing::warn!(
                keyspace = %self.name(),
                table = %name,
                "table already exists; registering the existing table"
            );
            self.register(&name, schema.clone());
            return Ok((self.handle(schema), CreateOutcome::AlreadyExists));
        }

        tracing::info!(keyspace = %self.name(), table = %name, model = M::NAME, "creating table");

        let session = &self.inner.session;
        session
            .execute(&Statement::create_table(schema.name.clone(), &schema.entity))
            .await?;

        for index in Statement::create_indices(&schema.name, &schema.entity) {
            session.execute(&index).await?;
        }

        self.register(&name, schema.clone());
        Ok((self.handle(schema), CreateOutcome::Created))
    }

    /// Returns the registered table `name`.
    pub fn table<M: Model>(&self, name: &str) -> Result<Table<M>> {
        let name = name.to_ascii_lowercase();
        let Some(schema) = self.inner.tables.read().get(&name).cloned() else {
            return Err(Error::table_not_found(self.name(), name));
        };

        if schema.entity.name() != M::NAME {
            bail!(
                "table `{}` is mapped to `{}`, not `{}`",
                schema.name,
                schema.entity.name(),
                M::NAME
            );
        }

        Ok(self.handle(schema))
    }

    /// Asks the store whether the table exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let stmt = Statement::table_exists(self.name(), &name.to_ascii_lowercase());
        let names = self.inner.session.query_names(&stmt).await?;
        Ok(!names.is_empty())
    }

    /// Table names of this keyspace, as the store reports them.
    pub async fn tables(&self) -> Result<Vec<String>> {
        let stmt = Statement::list_tables(self.name());
        self.inner.session.query_names(&stmt).await
    }

    /// Names of the tables registered through this handle, sorted.
    pub fn registered_tables(&self) -> Vec<String> {
        let mut names: Vec<_> = self.inner.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drops the table and removes its registration.
    pub async fn drop_table(&self, name: &str) -> Result<()> {
        let name = table_name(name)?;

        self.inner
            .session
            .execute(&Statement::drop_table(Name::qualified(self.name(), &name)))
            .await?;

        self.inner.tables.write().remove(&name);
        tracing::info!(keyspace = %self.name(), table = %name, "dropped table");
        Ok(())
    }

    fn register(&self, name: &str, schema: Arc<TableSchema>) {
        self.inner.tables.write().insert(name.to_string(), schema);
    }

    fn handle<M: Model>(&self, schema: Arc<TableSchema>) -> Table<M> {
        Table::new(schema, self.inner.session.clone(), self.inner.page_size)
    }
}

/// Checks an unquoted identifier and returns it lower-cased, the way the
/// store folds it.
pub(crate) fn identifier(name: &str) -> std::result::Result<String, &'static str> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Err("name is empty"),
        Some(ch) if !ch.is_ascii_alphabetic() => {
            return Err("name must start with a letter");
        }
        Some(_) => {}
    }

    if !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err("name may only contain letters, digits and underscores");
    }

    if name.len() > 48 {
        return Err("name is longer than 48 characters");
    }

    Ok(name.to_ascii_lowercase())
}

fn table_name(name: &str) -> Result<String> {
    match identifier(name) {
        Ok(name) => Ok(name),
        Err(reason) => bail!("invalid table name `{name}`: {reason}"),
    }
}
