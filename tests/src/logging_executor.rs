use cqlmap::{
    async_trait,
    driver::{PagingState, Request, Response},
    stmt::Row,
    Executor, Result,
};
use std::sync::{Arc, Mutex};

/// An executor wrapper that logs every statement for assertions.
#[derive(Debug)]
pub struct LoggingExecutor<E> {
    inner: E,

    /// Log of all statements sent through this executor
    ops_log: Arc<Mutex<Vec<ExecOp>>>,
}

/// One logged statement.
#[derive(Debug, Clone)]
pub struct ExecOp {
    pub cql: String,

    /// `None` for statements sent through `execute`
    pub page_size: Option<u32>,

    /// Rows returned, when the statement was a query
    pub rows: Option<Vec<Row>>,

    pub paging_state: Option<PagingState>,
}

impl<E: Executor> LoggingExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<ExecOp>>> {
        self.ops_log.clone()
    }

    fn push(&self, op: ExecOp) {
        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(op);
    }
}

#[async_trait]
impl<E: Executor> Executor for LoggingExecutor<E> {
    async fn execute(&self, cql: &str) -> Result<()> {
        self.inner.execute(cql).await?;

        self.push(ExecOp {
            cql: cql.to_string(),
            page_size: None,
            rows: None,
            paging_state: None,
        });

        Ok(())
    }

    async fn query(&self, request: Request) -> Result<Response> {
        let cql = request.cql.clone();
        let page_size = request.page_size;

        let response = self.inner.query(request).await?;

        // Buffer the rows so the log and the caller each get a copy
        let rows = response.rows.collect().await?;

        self.push(ExecOp {
            cql,
            page_size,
            rows: Some(rows.clone()),
            paging_state: response.paging_state.clone(),
        });

        Ok(Response::rows(rows).with_paging_state(response.paging_state))
    }
}
