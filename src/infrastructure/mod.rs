//! Infrastructure layer for external integrations.
//!
//! Implements the gateway traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`http`] - REST gateways talking to the link backend

pub mod http;
