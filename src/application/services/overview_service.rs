//! Read-only summary shown on the console landing page.

use std::sync::Arc;

use crate::application::store::{ListStore, StoreSnapshot};
use crate::domain::entities::LinkRecord;
use crate::domain::gateways::LinkGateway;

/// Totals and the most recent links, derived from one store snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    /// First records of the aggregate list, in backend order.
    pub recent: Vec<LinkRecord>,
    pub total_urls: usize,
    pub total_clicks: u64,
    pub loading: bool,
    pub error: Option<String>,
}

impl Overview {
    pub fn from_snapshot(snapshot: &StoreSnapshot, recent_limit: usize) -> Self {
        Self {
            recent: snapshot
                .aggregate
                .items
                .iter()
                .take(recent_limit)
                .cloned()
                .collect(),
            total_urls: snapshot.aggregate.total_urls,
            total_clicks: snapshot.aggregate.total_clicks,
            loading: snapshot.loading,
            error: snapshot.error.clone(),
        }
    }
}

/// Service backing the overview page.
///
/// Never fetches on its own; it only reads what the shared store holds.
pub struct OverviewService<G: LinkGateway> {
    store: Arc<ListStore<G>>,
    recent_limit: usize,
}

impl<G: LinkGateway> OverviewService<G> {
    pub fn new(store: Arc<ListStore<G>>, recent_limit: usize) -> Self {
        Self {
            store,
            recent_limit,
        }
    }

    pub fn overview(&self) -> Overview {
        Overview::from_snapshot(&self.store.snapshot(), self.recent_limit)
    }
}
