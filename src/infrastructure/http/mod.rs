//! REST gateways over `reqwest`.
//!
//! - [`ApiClient`] - base URL, bearer token, timeout and error mapping
//! - [`HttpLinkGateway`] - links and analytics
//! - [`HttpAuthGateway`] - login and registration

mod auth_gateway;
mod client;
pub mod dto;
mod link_gateway;

pub use auth_gateway::HttpAuthGateway;
pub use client::ApiClient;
pub use link_gateway::HttpLinkGateway;
