//! Per-day click counter for one link.

use chrono::{DateTime, Utc};

/// Click count aggregated by the backend for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyClicks {
    pub id: String,
    pub url_id: String,
    pub date: DateTime<Utc>,
    pub total_clicks: u64,
}

impl DailyClicks {
    pub fn new(
        id: impl Into<String>,
        url_id: impl Into<String>,
        date: DateTime<Utc>,
        total_clicks: u64,
    ) -> Self {
        Self {
            id: id.into(),
            url_id: url_id.into(),
            date,
            total_clicks,
        }
    }
}
