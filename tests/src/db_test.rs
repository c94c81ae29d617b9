use crate::{ExecLog, ExecOp, LoggingExecutor, Setup};

use cqlmap::{db::Builder, Db, Keyspace};
use cqlmap_driver_memory::Memory;
use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, Once},
};

/// Keyspace every test database starts with
pub const KEYSPACE: &str = "app";

/// Runs one test body against one executor setup.
///
/// The test owns its runtime so each test gets a fresh, single-threaded
/// reactor, and every statement goes through a [`LoggingExecutor`].
pub struct DbTest<S: Setup> {
    runtime: Option<tokio::runtime::Runtime>,
    setup: S,
    memory: Option<Memory>,
    ops_log: Arc<Mutex<Vec<ExecOp>>>,
}

impl<S: Setup> DbTest<S> {
    /// Create a new DbTest with a current-thread runtime.
    pub fn new(setup: S) -> Self {
        init_tracing();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        Self {
            runtime: Some(runtime),
            setup,
            memory: None,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Try to set up a database whose `app` keyspace exists
    pub async fn try_setup_db(&mut self, builder: &mut Builder) -> cqlmap::Result<Db> {
        let memory = self.setup.executor();
        let executor = LoggingExecutor::new(memory.clone());

        self.ops_log = executor.ops_log_handle();
        self.memory = Some(memory);

        let db = builder.keyspace(KEYSPACE).build(executor)?;
        db.create_keyspace(KEYSPACE).await?;

        // Keyspace creation is not part of what tests assert on
        self.log().clear();

        Ok(db)
    }

    /// Set up a database with default settings
    pub async fn setup_db(&mut self) -> Db {
        self.try_setup_db(&mut Db::builder()).await.unwrap()
    }

    /// Set up a database and return its default keyspace
    pub async fn setup_keyspace(&mut self) -> Keyspace {
        let db = self.setup_db().await;
        db.default_keyspace().unwrap()
    }

    /// Get the statement log for assertions
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    /// The executor's storage, for checks that bypass the mapper
    pub fn memory(&self) -> &Memory {
        self.memory.as_ref().expect("database not set up")
    }

    pub fn setup_name(&self) -> &'static str {
        self.setup.name()
    }

    /// Run a test function with a mutable reference to self, using our managed runtime.
    pub fn run_test<F>(&mut self, test_fn: F)
    where
        F: for<'a> FnOnce(&'a mut DbTest<S>) -> Pin<Box<dyn Future<Output = ()> + 'a>>,
    {
        let runtime = self.runtime.take().expect("test already ran");
        runtime.block_on(test_fn(self));
        self.runtime = Some(runtime);
    }
}

fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
