//! Gateway trait definitions for the domain layer.
//!
//! Gateways abstract the REST backend the console talks to, the same way
//! repository traits abstract a database. Implementations live in
//! `crate::infrastructure::http`; mocks are generated via `mockall`.
//!
//! # Available Gateways
//!
//! - [`LinkGateway`] - Link listing, creation and deletion
//! - [`AnalyticsGateway`] - Per-day click series
//! - [`AuthGateway`] - Login and registration

pub mod analytics_gateway;
pub mod auth_gateway;
pub mod link_gateway;

pub use analytics_gateway::AnalyticsGateway;
pub use auth_gateway::AuthGateway;
pub use link_gateway::LinkGateway;

#[cfg(test)]
pub use analytics_gateway::MockAnalyticsGateway;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use link_gateway::MockLinkGateway;
