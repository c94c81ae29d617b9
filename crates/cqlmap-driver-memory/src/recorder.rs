use cqlmap_core::{
    async_trait,
    driver::{PagingState, Request, Response},
    stmt::{Row, RowStream},
    Error, Executor, Result,
};

use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

/// Records statement text instead of executing it.
///
/// Queries are answered from pages queued with [`Recorder::push_rows`],
/// [`Recorder::push_page`] or [`Recorder::push_failure`], in order. Each
/// page is streamed back row by row. Once the queue is empty every query
/// returns no rows. Clones share the same log and queue.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    statements: Vec<String>,
    requests: Vec<Request>,
    pages: VecDeque<(Vec<Result<Row>>, Option<PagingState>)>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }

    /// Queues the rows returned by the next query.
    pub fn push_rows(&self, rows: impl IntoIterator<Item = Row>) {
        self.push_page(rows, None);
    }

    /// Queues a page and the paging state returned with it.
    pub fn push_page(&self, rows: impl IntoIterator<Item = Row>, paging_state: Option<PagingState>) {
        self.inner
            .lock()
            .pages
            .push_back((rows.into_iter().map(Ok).collect(), paging_state));
    }

    /// Queues a page whose stream yields `rows` and then fails with `err`.
    pub fn push_failure(&self, rows: impl IntoIterator<Item = Row>, err: Error) {
        let mut page: Vec<_> = rows.into_iter().map(Ok).collect();
        page.push(Err(err));
        self.inner.lock().pages.push_back((page, None));
    }

    /// Text of every statement received so far, executed or queried.
    pub fn statements(&self) -> Vec<String> {
        self.inner.lock().statements.clone()
    }

    /// Every query request received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.inner.lock().requests.clone()
    }

    /// Returns and clears the statement log.
    pub fn take(&self) -> Vec<String> {
        let mut inner = self.inner.lock();
        inner.requests.clear();
        std::mem::take(&mut inner.statements)
    }
}

#[async_trait]
impl Executor for Recorder {
    async fn execute(&self, cql: &str) -> Result<()> {
        self.inner.lock().statements.push(cql.to_string());
        Ok(())
    }

    async fn query(&self, request: Request) -> Result<Response> {
        let mut inner = self.inner.lock();
        inner.statements.push(request.cql.clone());
        inner.requests.push(request);

        Ok(match inner.pages.pop_front() {
            Some((rows, paging_state)) => {
                Response::rows(RowStream::from_stream(tokio_stream::iter(rows)))
                    .with_paging_state(paging_state)
            }
            None => Response::empty(),
        })
    }
}
