use cqlmap_core::{
    driver::{PagingState, Request, Response},
    stmt::Value,
    Executor, Result,
};
use cqlmap_cql::{Serializer, Statement};

use std::sync::Arc;

/// Serializes statements and hands them to the executor.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    executor: Arc<dyn Executor>,
    serializer: Serializer,
}

impl Session {
    pub(crate) fn new(executor: Arc<dyn Executor>) -> Session {
        Session {
            executor,
            serializer: Serializer::new(),
        }
    }

    pub(crate) async fn execute(&self, stmt: &Statement) -> Result<()> {
        let cql = self.serializer.serialize(stmt);
        tracing::debug!(cql = %cql, "execute");
        self.executor.execute(&cql).await
    }

    pub(crate) async fn query(
        &self,
        stmt: &Statement,
        page_size: Option<u32>,
        paging_state: Option<PagingState>,
    ) -> Result<Response> {
        let cql = self.serializer.serialize(stmt);
        tracing::debug!(cql = %cql, ?page_size, paging = paging_state.is_some(), "query");

        let mut request = Request::new(cql).paging_state(paging_state);
        if let Some(page_size) = page_size {
            request = request.page_size(page_size);
        }

        self.executor.query(request).await
    }

    /// Runs a single-column query and collects the text values, as used for
    /// `system_schema` lookups.
    pub(crate) async fn query_names(&self, stmt: &Statement) -> Result<Vec<String>> {
        let rows = self.query(stmt, None, None).await?.rows.collect().await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row.get_index(0) {
                Some(Value::Text(name)) => Some(name.clone()),
                _ => None,
            })
            .collect())
    }
}
