//! Common imports for test files
//!
//! This module provides a convenient way to import frequently used items
//! in test files with `use tests::prelude::*;`

// Re-export core test infrastructure
pub use crate::{DbTest, ExecLog, Setup};

// Re-export macros
pub use crate::{assert_eq_unordered, tests};
pub use std_util::prelude::*;
