//! Schema-driven mapping between Rust structs and CQL tables.
//!
//! A struct derives [`Model`]; its `#[cql("...")]` field tags are compiled
//! into an [`Entity`] once per table, and every statement against that
//! table is built and checked from the entity.

// Lets `#[derive(Model)]` expand inside this crate.
extern crate self as cqlmap;

mod bind;
pub use bind::{bind, Binder};

pub mod db;
pub use db::Db;

mod keyspace;
pub use keyspace::{CreateOutcome, Keyspace};

mod model;
pub use model::Model;

mod page;
pub use page::{ListOptions, Page};

mod primitive;
pub use primitive::{Blob, Primitive};

mod session;

mod table;
pub use table::{Table, TableSchema};

pub use cqlmap_core::{
    async_trait, bail, driver, err, schema, stmt, Entity, Error, Executor, Result,
};
pub use cqlmap_macros::Model;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{Model, Primitive};
    pub use cqlmap_core::{
        schema::FieldDef,
        stmt::{Record, Value},
        Error, Result,
    };
}
