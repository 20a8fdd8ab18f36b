//! Gateway trait for per-link analytics.

use crate::domain::entities::DailyClicks;
use crate::error::AppError;
use async_trait::async_trait;

/// Backend interface for click analytics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    /// Retrieves the per-day click series for one link, in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Fetch`] on network or HTTP failure.
    async fn daily_clicks(&self, url_id: &str) -> Result<Vec<DailyClicks>, AppError>;
}
