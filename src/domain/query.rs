//! List query parameters and page results exchanged with the backend.

use super::entities::LinkRecord;

/// Parameters of the paginated, searchable links view.
///
/// `page` is 1-indexed. `search` is applied by the backend as a
/// case-insensitive substring filter over the original URL and short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
}

impl ListQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            search: String::new(),
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// The search term as sent on the wire; blank terms are omitted.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }
}

/// One page of records plus the page count reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub items: Vec<LinkRecord>,
    pub total_pages: u32,
}

impl PageResult {
    pub fn new(items: Vec<LinkRecord>, total_pages: u32) -> Self {
        Self { items, total_pages }
    }

    /// No record matched the query.
    pub fn empty() -> Self {
        Self::default()
    }
}
