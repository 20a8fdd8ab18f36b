//! Application layer: the shared list store and the page services.
//!
//! The store owns every cached record. Services are thin per-page
//! controllers that read store snapshots and forward user actions.
//!
//! # Components
//!
//! - [`store::ListStore`] - Shared cache with sequenced fetches
//! - [`services::OverviewService`] - Totals and recent links
//! - [`services::LinksConsole`] - Paginated table, search, create, delete
//! - [`services::AnalyticsService`] - Per-link click series
//! - [`services::AuthService`] - Login and registration

pub mod services;
pub mod store;
