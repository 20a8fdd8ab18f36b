//! Shared list store consumed by the overview, links and analytics views.
//!
//! The store is the single writer of its cached state. It publishes whole
//! [`StoreSnapshot`] values through a `tokio::sync::watch` channel, so a
//! consumer either sees a commit in full or not at all.
//!
//! # Request sequencing
//!
//! The paginated list and the unpaginated aggregate are fetched independently
//! and may complete in any order. Each view has its own [`RequestSequencer`];
//! a response is applied only if its ticket is still the latest issued for
//! that view. Superseded responses are dropped.
//!
//! # Mutations
//!
//! Create and delete always end with a full [`ListStore::refresh`]. Delete is
//! two-phase: the record disappears locally first
//! ([`ListStore::optimistic_delete`]), then the refresh reconciles with the
//! backend whatever the outcome of the request was.

mod sequencer;
mod snapshot;

pub use sequencer::{RequestSequencer, Ticket};
pub use snapshot::{AggregateView, ListView, StoreSnapshot};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::domain::gateways::LinkGateway;
use crate::domain::query::{ListQuery, PageResult};
use crate::error::AppError;

struct ListOutcome {
    ticket: Ticket,
    query: ListQuery,
    result: Result<PageResult, AppError>,
}

struct AggregateOutcome {
    ticket: Ticket,
    result: Result<Vec<LinkRecord>, AppError>,
}

/// Fetches counted in the snapshot's `loading` flag.
///
/// Released by `commit`. If the fetching future is dropped before its
/// response lands, `Drop` takes the count back.
struct PendingFetches<'a> {
    state: &'a watch::Sender<StoreSnapshot>,
    requests: usize,
}

impl PendingFetches<'_> {
    fn release(mut self) -> usize {
        std::mem::take(&mut self.requests)
    }
}

impl Drop for PendingFetches<'_> {
    fn drop(&mut self) {
        let requests = self.requests;
        if requests > 0 {
            debug!(requests, "Fetch abandoned before completion");
            self.state.send_modify(|s| s.finish(requests));
        }
    }
}

/// Client-side cache of the account's links.
pub struct ListStore<G: LinkGateway> {
    gateway: Arc<G>,
    state: watch::Sender<StoreSnapshot>,
    list_seq: RequestSequencer,
    aggregate_seq: RequestSequencer,
    closed: AtomicBool,
}

impl<G: LinkGateway> ListStore<G> {
    /// Creates an empty store. Nothing is fetched until [`Self::refresh`].
    pub fn new(gateway: Arc<G>, page_size: u32) -> Self {
        Self {
            gateway,
            state: watch::Sender::new(StoreSnapshot::initial(page_size)),
            list_seq: RequestSequencer::new(),
            aggregate_seq: RequestSequencer::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Creates the store and populates both views.
    pub async fn mount(gateway: Arc<G>, page_size: u32) -> Arc<Self> {
        let store = Arc::new(Self::new(gateway, page_size));
        store.refresh().await;
        store
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Detaches the store from the session.
    ///
    /// Responses still in flight are discarded when they land and later
    /// operations leave the cached state untouched.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.list_seq.invalidate();
        self.aggregate_seq.invalidate();
        info!("List store closed");
    }

    /// Moves the list view to `page` (1-indexed).
    ///
    /// Returns `false` without fetching when the page is already the requested one.
    pub async fn set_page(&self, page: u32) -> bool {
        let page = page.max(1);
        self.update_query(move |q| {
            if q.page == page {
                return false;
            }
            q.page = page;
            true
        })
        .await
    }

    /// Changes the search term of the list view.
    ///
    /// The term is trimmed. Returns `false` without fetching when it did not change.
    pub async fn set_search(&self, term: &str) -> bool {
        let term = term.trim().to_string();
        self.update_query(move |q| {
            if q.search == term {
                return false;
            }
            q.search = term;
            true
        })
        .await
    }

    /// Changes page and search together with a single fetch.
    pub async fn set_query(&self, page: u32, term: &str) -> bool {
        let page = page.max(1);
        let term = term.trim().to_string();
        self.update_query(move |q| {
            if q.page == page && q.search == term {
                return false;
            }
            q.page = page;
            q.search = term;
            true
        })
        .await
    }

    /// Re-fetches the list view with the current parameters.
    pub async fn reload_list(&self) {
        if self.is_closed() {
            return;
        }
        let Some((pending, (ticket, query))) =
            self.begin_fetch(1, |s| Some((self.list_seq.issue(), s.query.clone())))
        else {
            return;
        };
        self.fetch_list(pending, ticket, query).await;
    }

    /// Re-fetches the aggregate view.
    ///
    /// On failure the previous totals stay visible and the error is recorded.
    pub async fn reload_aggregate(&self) {
        if self.is_closed() {
            return;
        }
        let Some((pending, ticket)) = self.begin_fetch(1, |_| Some(self.aggregate_seq.issue()))
        else {
            return;
        };

        debug!(ticket = ticket.get(), "Fetching all links");
        let result = self.gateway.list_all().await;
        self.commit(pending, None, Some(AggregateOutcome { ticket, result }));
    }

    /// Re-fetches both views and applies them in one commit.
    pub async fn refresh(&self) {
        self.refresh_with(None).await;
    }

    /// Moves the list view to `page` and `term`, then re-fetches both views
    /// in one commit.
    pub async fn refresh_at(&self, page: u32, term: &str) {
        self.refresh_with(Some((page.max(1), term.trim().to_string())))
            .await;
    }

    /// Removes a record from both views without contacting the backend.
    ///
    /// Idempotent: returns `false` when the id is not cached.
    pub fn optimistic_delete(&self, id: &str) -> bool {
        if self.is_closed() {
            return false;
        }
        let removed = self.state.send_if_modified(|s| {
            let from_page = s.list.remove(id);
            let from_aggregate = s.aggregate.remove(id);
            from_page || from_aggregate
        });
        if removed {
            debug!(id, "Optimistically removed link");
        }
        removed
    }

    /// Creates a link, then refreshes both views.
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged. A rejected creation leaves the
    /// cached state and the store error untouched.
    pub async fn create(&self, new_link: NewLinkRecord) -> Result<LinkRecord, AppError> {
        let created = self.create_link(new_link).await?;
        self.refresh().await;
        Ok(created)
    }

    /// Creates a link, then shows `page` with `term` and refreshes both
    /// views with a single fetch of each.
    ///
    /// # Errors
    ///
    /// See [`Self::create`]. The list parameters only change on success.
    pub async fn create_and_show(
        &self,
        new_link: NewLinkRecord,
        page: u32,
        term: &str,
    ) -> Result<LinkRecord, AppError> {
        let created = self.create_link(new_link).await?;
        self.refresh_at(page, term).await;
        Ok(created)
    }

    /// Deletes a link optimistically and reconciles with the backend.
    ///
    /// A `NotFound` from the backend counts as success. Any other failure is
    /// returned after the refresh has restored the record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Fetch`] when the backend rejected the delete.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if self.is_closed() {
            return Err(closed_error());
        }
        self.optimistic_delete(id);

        let outcome = match self.gateway.delete(id).await {
            Ok(()) => {
                info!(id, "Link deleted");
                Ok(())
            }
            Err(e) if e.is_benign() => {
                debug!(id, "Link already gone");
                Ok(())
            }
            Err(e) => {
                warn!(id, error = %e, "Delete failed, restoring from backend");
                Err(e)
            }
        };

        self.refresh().await;
        outcome
    }

    async fn create_link(&self, new_link: NewLinkRecord) -> Result<LinkRecord, AppError> {
        if self.is_closed() {
            return Err(closed_error());
        }
        let created = self.gateway.create(new_link).await?;
        info!(id = %created.id, code = %created.short_code, "Link created");
        Ok(created)
    }

    async fn refresh_with(&self, query_change: Option<(u32, String)>) {
        if self.is_closed() {
            return;
        }
        let Some((pending, (list_ticket, query, aggregate_ticket))) = self.begin_fetch(2, |s| {
            if let Some((page, term)) = query_change {
                s.query.page = page;
                s.query.search = term;
            }
            Some((
                self.list_seq.issue(),
                s.query.clone(),
                self.aggregate_seq.issue(),
            ))
        }) else {
            return;
        };

        debug!(
            page = query.page,
            search = %query.search,
            "Refreshing links"
        );
        let (page, all) = tokio::join!(
            self.gateway.list_page(query.clone()),
            self.gateway.list_all()
        );

        self.commit(
            pending,
            Some(ListOutcome {
                ticket: list_ticket,
                query,
                result: page,
            }),
            Some(AggregateOutcome {
                ticket: aggregate_ticket,
                result: all,
            }),
        );
    }

    async fn update_query<F>(&self, apply: F) -> bool
    where
        F: FnOnce(&mut ListQuery) -> bool,
    {
        if self.is_closed() {
            return false;
        }
        let issued = self.begin_fetch(1, |s| {
            apply(&mut s.query).then(|| (self.list_seq.issue(), s.query.clone()))
        });

        let Some((pending, (ticket, query))) = issued else {
            debug!("List parameters unchanged, skipping fetch");
            return false;
        };
        self.fetch_list(pending, ticket, query).await;
        true
    }

    /// Issues tickets and counts `requests` as outstanding, in one publish.
    ///
    /// Nothing is published when `issue` returns `None`.
    fn begin_fetch<T>(
        &self,
        requests: usize,
        issue: impl FnOnce(&mut StoreSnapshot) -> Option<T>,
    ) -> Option<(PendingFetches<'_>, T)> {
        let mut issued = None;
        self.state.send_if_modified(|s| {
            issued = issue(s);
            if issued.is_some() {
                s.begin(requests);
            }
            issued.is_some()
        });
        issued.map(|value| {
            (
                PendingFetches {
                    state: &self.state,
                    requests,
                },
                value,
            )
        })
    }

    async fn fetch_list(&self, pending: PendingFetches<'_>, ticket: Ticket, query: ListQuery) {
        debug!(
            ticket = ticket.get(),
            page = query.page,
            search = %query.search,
            "Fetching links page"
        );
        let result = self.gateway.list_page(query.clone()).await;
        self.commit(
            pending,
            Some(ListOutcome {
                ticket,
                query,
                result,
            }),
            None,
        );
    }

    fn commit(
        &self,
        pending: PendingFetches<'_>,
        list: Option<ListOutcome>,
        aggregate: Option<AggregateOutcome>,
    ) {
        let requests = pending.release();
        let closed = self.is_closed();

        self.state.send_modify(|s| {
            s.finish(requests);
            if closed {
                debug!("Store closed, discarding response");
                return;
            }

            let mut applied = false;

            if let Some(outcome) = list {
                if !self.list_seq.is_current(outcome.ticket) {
                    debug!(ticket = outcome.ticket.get(), "Discarding superseded page response");
                } else {
                    match outcome.result {
                        Ok(page) => {
                            s.list = ListView::from_page(&outcome.query, page);
                            s.list_error = None;
                            applied = true;
                        }
                        Err(e) => {
                            warn!(error = %e, "Failed to fetch links page, keeping cached page");
                            s.list_error = Some(e.message().to_string());
                        }
                    }
                }
            }

            if let Some(outcome) = aggregate {
                if !self.aggregate_seq.is_current(outcome.ticket) {
                    debug!(
                        ticket = outcome.ticket.get(),
                        "Discarding superseded aggregate response"
                    );
                } else {
                    match outcome.result {
                        Ok(items) => {
                            s.aggregate = AggregateView::from_items(items);
                            s.aggregate_error = None;
                            applied = true;
                        }
                        Err(e) => {
                            warn!(error = %e, "Failed to fetch all links, keeping cached totals");
                            s.aggregate_error = Some(e.message().to_string());
                        }
                    }
                }
            }

            s.surface_error();
            if applied {
                s.loaded = true;
            }
        });
    }
}

fn closed_error() -> AppError {
    AppError::fetch(None, "Link store is closed")
}
