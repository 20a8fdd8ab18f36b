//! Domain layer containing the console's entities and gateway contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`query`] - List parameters and page results
//! - [`gateways`] - Backend access trait definitions
//!
//! The domain layer has no dependency on the HTTP transport. Gateway traits
//! are implemented in `crate::infrastructure::http` and mocked in tests.

pub mod entities;
pub mod gateways;
pub mod query;
