use cqlmap_core::driver::PagingState;

/// Options for [`Table::list`](crate::Table::list).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// `LIMIT` for the statement; overrides the query's limit when set
    pub limit: Option<u64>,

    /// Rows per page. Falls back to the configured page size.
    pub page_size: Option<u32>,

    /// Where to resume, from [`Page::paging_state`]
    pub paging_state: Option<PagingState>,
}

impl ListOptions {
    pub fn new() -> ListOptions {
        ListOptions::default()
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn paging_state(mut self, paging_state: Option<PagingState>) -> Self {
        self.paging_state = paging_state;
        self
    }
}

/// One page of listed records.
#[derive(Debug)]
pub struct Page<M> {
    /// Items in this page
    pub items: Vec<M>,

    /// Executor cursor for the next page; `None` on the last page
    pub paging_state: Option<PagingState>,
}

impl<M> Page<M> {
    /// Returns true if there is a next page available
    pub fn has_next(&self) -> bool {
        self.paging_state.is_some()
    }

    /// Options that fetch the page after this one.
    pub fn next_options(&self, options: &ListOptions) -> Option<ListOptions> {
        let paging_state = self.paging_state.clone()?;

        Some(ListOptions {
            paging_state: Some(paging_state),
            ..options.clone()
        })
    }
}

impl<M> IntoIterator for Page<M> {
    type Item = M;
    type IntoIter = std::vec::IntoIter<M>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
