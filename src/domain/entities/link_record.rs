//! Link record entity representing one shortened URL owned by the account.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// `total_clicks` is a client copy of a server-side counter. Client logic never
/// decrements it; it is only replaced by fresher values from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: String,
    pub short_code: String,
    pub original_url: String,
    pub total_clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates a new LinkRecord instance.
    pub fn new(
        id: impl Into<String>,
        short_code: impl Into<String>,
        original_url: impl Into<String>,
        total_clicks: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            short_code: short_code.into(),
            original_url: original_url.into(),
            total_clicks,
            created_at,
        }
    }

    /// Case-insensitive substring match over the original URL and short code.
    ///
    /// Filtering is the backend's job; this mirrors its contract for fakes and
    /// for consumers that want to highlight matches.
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.original_url.to_lowercase().contains(&needle)
            || self.short_code.to_lowercase().contains(&needle)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkRecord {
    pub original_url: String,
    /// Requested short code; the backend generates one when absent.
    pub custom_alias: Option<String>,
}

impl NewLinkRecord {
    /// Builds a creation request, treating a blank alias as no alias.
    pub fn new(original_url: impl Into<String>, custom_alias: Option<&str>) -> Self {
        Self {
            original_url: original_url.into().trim().to_string(),
            custom_alias: custom_alias
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
        }
    }
}
