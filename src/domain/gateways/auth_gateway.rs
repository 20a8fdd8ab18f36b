//! Gateway trait for account authentication.

use crate::domain::entities::{AuthSession, Credentials};
use crate::error::AppError;
use async_trait::async_trait;

/// Backend interface for issuing bearer sessions.
///
/// Token issuance lives entirely in the backend; the console only forwards
/// credentials and keeps the returned session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] or [`AppError::Fetch`] (401) on bad credentials.
    async fn login(&self, credentials: Credentials) -> Result<AuthSession, AppError>;

    /// Creates an account and returns its first session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is taken or input is rejected.
    async fn register(&self, credentials: Credentials) -> Result<AuthSession, AppError>;
}
