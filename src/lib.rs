//! # Link Console
//!
//! Client-side core of a URL shortener dashboard: a shared cache of the
//! account's links, kept consistent across the overview, links and analytics
//! pages, talking to the shortener's REST backend.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, list parameters and gateway traits
//! - **Application Layer** ([`application`]) - The shared list store and page services
//! - **Infrastructure Layer** ([`infrastructure`]) - REST gateways over `reqwest`
//!
//! ## Features
//!
//! - One store feeding every page, published as atomic snapshots
//! - Last-issued-wins sequencing of overlapping fetches
//! - Optimistic delete reconciled by a mandatory refresh
//! - Client-side totals over the full link list
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use link_console::session::ConsoleSession;
//!
//! let session = ConsoleSession::from_env().await?;
//! let overview = session.overview().overview();
//! println!("{} links, {} clicks", overview.total_urls, overview.total_clicks);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod session;
pub mod telemetry;
pub mod utils;

pub use error::AppError;
pub use session::ConsoleSession;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AnalyticsService, AnalyticsView, AuthService, LinksConsole, Overview, OverviewService,
    };
    pub use crate::application::store::{ListStore, StoreSnapshot};
    pub use crate::domain::entities::{DailyClicks, LinkRecord, NewLinkRecord};
    pub use crate::domain::query::{ListQuery, PageResult};
    pub use crate::error::AppError;
    pub use crate::infrastructure::http::{ApiClient, HttpAuthGateway, HttpLinkGateway};
    pub use crate::session::ConsoleSession;
}
