//! Analytics page: link selector and per-day click chart.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::application::store::{ListStore, RequestSequencer};
use crate::domain::entities::{DailyClicks, LinkRecord};
use crate::domain::gateways::{AnalyticsGateway, LinkGateway};

const ANALYTICS_FAILED: &str = "Failed to load analytics data";

/// One bar of the click chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    /// Short day label, e.g. `Mar 7`.
    pub label: String,
    pub date: DateTime<Utc>,
    pub clicks: u64,
}

/// State of the analytics page, published as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsView {
    pub selected: Option<String>,
    /// Series for `selected`, in backend order.
    pub series: Vec<DailyClicks>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AnalyticsView {
    /// Chart points in reverse backend order (oldest first for a newest-first series).
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.series
            .iter()
            .rev()
            .map(|day| ChartPoint {
                label: day.date.format("%b %-d").to_string(),
                date: day.date,
                clicks: day.total_clicks,
            })
            .collect()
    }

    pub fn total_clicks(&self) -> u64 {
        self.series.iter().map(|day| day.total_clicks).sum()
    }
}

/// Loads click series for the selected link.
///
/// The link selector is fed by the shared store's aggregate list. Series
/// requests are sequenced separately from the store: selecting quickly
/// between links only ever shows the series of the last selection.
pub struct AnalyticsService<G: LinkGateway, A: AnalyticsGateway> {
    store: Arc<ListStore<G>>,
    gateway: Arc<A>,
    state: watch::Sender<AnalyticsView>,
    sequencer: RequestSequencer,
}

impl<G: LinkGateway, A: AnalyticsGateway> AnalyticsService<G, A> {
    pub fn new(store: Arc<ListStore<G>>, gateway: Arc<A>) -> Self {
        Self {
            store,
            gateway,
            state: watch::Sender::new(AnalyticsView::default()),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AnalyticsView> {
        self.state.subscribe()
    }

    pub fn view(&self) -> AnalyticsView {
        self.state.borrow().clone()
    }

    pub fn selected_record(&self) -> Option<LinkRecord> {
        let selected = self.state.borrow().selected.clone()?;
        self.store.snapshot().aggregate.find(&selected).cloned()
    }

    /// Store error first, then the analytics error.
    pub fn display_error(&self) -> Option<String> {
        self.store
            .snapshot()
            .error
            .or_else(|| self.state.borrow().error.clone())
    }

    /// Keeps the selection pointing at an existing record.
    ///
    /// Selects the first aggregate record when nothing is selected or the
    /// selected record is gone. Returns `true` when the selection changed.
    pub async fn sync_selection(&self) -> bool {
        let aggregate = self.store.snapshot().aggregate;
        let selected = self.state.borrow().selected.clone();

        if let Some(id) = selected.as_deref()
            && aggregate.find(id).is_some()
        {
            return false;
        }

        match aggregate.items.first() {
            Some(first) => {
                self.select(&first.id).await;
                true
            }
            None if selected.is_some() => {
                self.sequencer.invalidate();
                self.state.send_replace(AnalyticsView::default());
                debug!("Selected link disappeared, selection cleared");
                true
            }
            None => false,
        }
    }

    /// Selects a link and loads its click series.
    pub async fn select(&self, id: &str) {
        if self.store.is_closed() {
            return;
        }

        let mut ticket = None;
        self.state.send_modify(|view| {
            if view.selected.as_deref() != Some(id) {
                view.selected = Some(id.to_string());
                view.series.clear();
            }
            view.loading = true;
            view.error = None;
            ticket = Some(self.sequencer.issue());
        });
        let Some(ticket) = ticket else {
            return;
        };

        debug!(id, ticket = ticket.get(), "Fetching click series");
        let result = self.gateway.daily_clicks(id).await;

        self.state.send_if_modified(|view| {
            if self.store.is_closed() || !self.sequencer.is_current(ticket) {
                debug!(id, ticket = ticket.get(), "Discarding superseded click series");
                return false;
            }
            match result {
                Ok(series) => {
                    view.series = series;
                    view.error = None;
                }
                Err(e) => {
                    warn!(id, error = %e, "Failed to load click series");
                    view.series.clear();
                    view.error = Some(ANALYTICS_FAILED.to_string());
                }
            }
            view.loading = false;
            true
        });
    }
}
