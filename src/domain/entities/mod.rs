//! Core domain entities representing the console's data model.
//!
//! Entities are plain data structures; wire formats live in
//! `crate::infrastructure::http::dto`.
//!
//! # Entity Types
//!
//! - [`LinkRecord`] - A shortened URL with its click counter
//! - [`DailyClicks`] - Per-day click count for one link
//! - [`Credentials`] / [`AuthSession`] - Login input and the issued session
//!
//! Creation input uses a separate struct ([`NewLinkRecord`]).

pub mod daily_clicks;
pub mod link_record;
pub mod session;

pub use daily_clicks::DailyClicks;
pub use link_record::{LinkRecord, NewLinkRecord};
pub use session::{AccountUser, AuthSession, Credentials, MIN_PASSWORD_LENGTH};
