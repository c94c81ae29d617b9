use crate::{async_trait, stmt::RowStream};

use std::fmt::Debug;

/// The session capability the mapper sends statement text to.
///
/// Statement text is the wire format: the mapper builds every statement in
/// full before calling the executor and never retries on its own.
#[async_trait]
pub trait Executor: Debug + Send + Sync + 'static {
    /// Executes a statement that returns no rows.
    async fn execute(&self, cql: &str) -> crate::Result<()>;

    /// Executes a statement and returns one page of rows.
    async fn query(&self, request: Request) -> crate::Result<Response>;
}

/// A query and its paging parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub cql: String,

    /// Maximum number of rows the executor returns in one page. `None`
    /// leaves the page size to the executor.
    pub page_size: Option<u32>,

    /// Where to resume, as returned by the previous page
    pub paging_state: Option<PagingState>,
}

#[derive(Debug)]
pub struct Response {
    pub rows: RowStream,

    /// Set when more rows are available after this page
    pub paging_state: Option<PagingState>,
}

/// Opaque executor cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PagingState(Vec<u8>);

impl Request {
    pub fn new(cql: impl Into<String>) -> Request {
        Request {
            cql: cql.into(),
            page_size: None,
            paging_state: None,
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Request {
        self.page_size = Some(page_size);
        self
    }

    pub fn paging_state(mut self, paging_state: Option<PagingState>) -> Request {
        self.paging_state = paging_state;
        self
    }
}

impl Response {
    pub fn rows(rows: impl Into<RowStream>) -> Response {
        Response {
            rows: rows.into(),
            paging_state: None,
        }
    }

    pub fn empty() -> Response {
        Response {
            rows: RowStream::default(),
            paging_state: None,
        }
    }

    pub fn with_paging_state(mut self, paging_state: Option<PagingState>) -> Response {
        self.paging_state = paging_state;
        self
    }
}

impl PagingState {
    pub fn new(bytes: impl Into<Vec<u8>>) -> PagingState {
        PagingState(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
