//! Page-level services built on the shared list store.

pub mod analytics_service;
pub mod auth_service;
pub mod links_console;
pub mod overview_service;

pub use analytics_service::{AnalyticsService, AnalyticsView, ChartPoint};
pub use auth_service::AuthService;
pub use links_console::LinksConsole;
pub use overview_service::{Overview, OverviewService};
