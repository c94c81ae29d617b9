#[macro_use]
mod macros;

pub mod db;

mod db_test;
pub use db_test::DbTest;

mod exec_log;
pub use exec_log::ExecLog;

mod logging_executor;
pub use logging_executor::{ExecOp, LoggingExecutor};

pub mod prelude;

pub use std_util::*;

use cqlmap_driver_memory::Memory;

/// Describes the executor a test database runs on.
pub trait Setup: Send + Sync + 'static {
    /// A fresh, empty executor.
    fn executor(&self) -> Memory;

    /// Name shown in test logs
    fn name(&self) -> &'static str;
}
