//! Immutable views published by the list store.

use crate::domain::entities::LinkRecord;
use crate::domain::query::{ListQuery, PageResult};

/// The visible page of the links view, together with the parameters that produced it.
///
/// `items`, `total_pages`, `page` and `search` always come from the same
/// backend response, so a consumer never sees items of one search paired with
/// the page count of another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub total_pages: u32,
    pub items: Vec<LinkRecord>,
}

impl ListView {
    pub fn from_page(query: &ListQuery, page: PageResult) -> Self {
        Self {
            page: query.page,
            page_size: query.page_size,
            search: query.search.clone(),
            total_pages: page.total_pages,
            items: page.items,
        }
    }

    /// Removes a record locally. Returns `false` when the id is not on this page.
    ///
    /// Emptying the last page drops it from the page count.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id != id);
        if self.items.len() == before {
            return false;
        }

        if self.items.is_empty() && self.total_pages > 0 && self.page >= self.total_pages {
            self.total_pages -= 1;
        }
        true
    }
}

/// The full record set with totals computed client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateView {
    pub items: Vec<LinkRecord>,
    pub total_urls: usize,
    pub total_clicks: u64,
}

impl AggregateView {
    pub fn from_items(items: Vec<LinkRecord>) -> Self {
        let mut view = Self {
            items,
            total_urls: 0,
            total_clicks: 0,
        };
        view.recompute();
        view
    }

    /// Removes a record locally and recomputes the totals.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id != id);
        if self.items.len() == before {
            return false;
        }
        self.recompute();
        true
    }

    pub fn find(&self, id: &str) -> Option<&LinkRecord> {
        self.items.iter().find(|r| r.id == id)
    }

    fn recompute(&mut self) {
        self.total_urls = self.items.len();
        self.total_clicks = self.items.iter().map(|r| r.total_clicks).sum();
    }
}

/// Everything a consuming view can read from the store, published as one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub list: ListView,
    pub aggregate: AggregateView,
    /// Most recently requested list parameters; `list` catches up once the fetch lands.
    pub query: ListQuery,
    pub loading: bool,
    /// At least one fetch has been applied since the store was created.
    pub loaded: bool,
    /// Error banner: the list error if any, else the aggregate error.
    pub error: Option<String>,
    /// Last failure of the list view, cleared when a page fetch succeeds.
    pub list_error: Option<String>,
    /// Last failure of the aggregate view, cleared when it loads again.
    pub aggregate_error: Option<String>,
    pub(super) pending: usize,
}

impl StoreSnapshot {
    pub(super) fn initial(page_size: u32) -> Self {
        let query = ListQuery::new(page_size);
        Self {
            list: ListView {
                page: query.page,
                page_size,
                ..ListView::default()
            },
            aggregate: AggregateView::default(),
            query,
            loading: false,
            loaded: false,
            error: None,
            list_error: None,
            aggregate_error: None,
            pending: 0,
        }
    }

    /// No data yet: consumers should render a loading/empty state, not an error banner.
    pub fn is_initial_load(&self) -> bool {
        !self.loaded
    }

    /// Whether either view still holds the record.
    pub fn contains(&self, id: &str) -> bool {
        self.aggregate.find(id).is_some() || self.list.items.iter().any(|r| r.id == id)
    }

    pub(super) fn surface_error(&mut self) {
        self.error = self
            .list_error
            .clone()
            .or_else(|| self.aggregate_error.clone());
    }

    pub(super) fn begin(&mut self, requests: usize) {
        self.pending += requests;
        self.loading = true;
    }

    pub(super) fn finish(&mut self, requests: usize) {
        self.pending = self.pending.saturating_sub(requests);
        self.loading = self.pending > 0;
    }
}
