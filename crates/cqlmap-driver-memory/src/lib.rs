//! An in-process executor for the CQL that `cqlmap-cql` emits.
//!
//! [`Memory`] parses each statement and applies it to tables held in
//! memory: keyspaces, tables and indexes, upserting inserts, counter and
//! collection deltas, filtering, ordering and paging. `system_schema`
//! lookups of keyspace and table names are answered from the same state.
//! TTLs and write timestamps are accepted and ignored.
//!
//! [`Recorder`] only records statement text and replays queued rows.

mod recorder;
pub use recorder::Recorder;

mod store;
use store::Store;

mod table;

mod value;

use cqlmap_core::{
    async_trait,
    driver::{PagingState, Request, Response},
    stmt::Row,
    Error, Executor, Result,
};
use cqlmap_cql::{stmt::Replication, Statement};

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// In-memory executor. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    store: Arc<Mutex<Store>>,

    /// Return rows without column names
    positional: bool,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    /// An executor that returns positional rows, ordered like the
    /// statement's projection.
    pub fn positional() -> Memory {
        Memory {
            positional: true,
            ..Memory::default()
        }
    }

    /// Number of rows stored in `keyspace.table`, or `None` if there is no
    /// such table.
    pub fn row_count(&self, keyspace: &str, table: &str) -> Option<usize> {
        self.store.lock().row_count(keyspace, table)
    }

    /// Replication the keyspace was created with.
    pub fn replication(&self, keyspace: &str) -> Option<Replication> {
        self.store.lock().replication(keyspace).cloned()
    }

    fn row(&self, values: IndexMap<String, cqlmap_core::stmt::Value>) -> Row {
        if self.positional {
            Row::Positional(values.into_values().collect())
        } else {
            Row::Named(values)
        }
    }
}

#[async_trait]
impl Executor for Memory {
    async fn execute(&self, cql: &str) -> Result<()> {
        let stmt = parse(cql)?;
        self.store.lock().execute(stmt).map_err(Error::driver)
    }

    async fn query(&self, request: Request) -> Result<Response> {
        let stmt = parse(&request.cql)?;

        let Statement::Select(select) = stmt else {
            self.store.lock().execute(stmt).map_err(Error::driver)?;
            return Ok(Response::empty());
        };

        let rows = self.store.lock().select(&select).map_err(Error::driver)?;

        let offset = match &request.paging_state {
            Some(state) => decode_offset(state)?,
            None => 0,
        };

        let end = match request.page_size {
            Some(page_size) => rows.len().min(offset + page_size as usize),
            None => rows.len(),
        };

        let next = (end < rows.len()).then(|| encode_offset(end));
        let page = rows
            .into_iter()
            .skip(offset)
            .take(end.saturating_sub(offset))
            .map(|values| self.row(values))
            .collect::<Vec<_>>();

        tracing::trace!(rows = page.len(), more = next.is_some(), "memory query");
        Ok(Response::rows(page).with_paging_state(next))
    }
}

fn parse(cql: &str) -> Result<Statement> {
    cqlmap_cql::parse::statement(cql).map_err(Error::driver)
}

/// Paging states are the big-endian offset of the next row.
fn encode_offset(offset: usize) -> PagingState {
    PagingState::new((offset as u64).to_be_bytes())
}

fn decode_offset(state: &PagingState) -> Result<usize> {
    let bytes: [u8; 8] = state
        .as_bytes()
        .try_into()
        .map_err(|_| cqlmap_core::err!("invalid paging state"))?;

    Ok(u64::from_be_bytes(bytes) as usize)
}
