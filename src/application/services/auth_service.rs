//! Login and registration against the link backend.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::domain::entities::{AuthSession, Credentials, MIN_PASSWORD_LENGTH};
use crate::domain::gateways::AuthGateway;
use crate::error::AppError;

/// Service for obtaining a bearer session.
///
/// Credentials are checked locally before any request is sent. The returned
/// [`AuthSession`] token is handed to the HTTP client by the caller; this
/// service never stores it.
pub struct AuthService<A: AuthGateway> {
    gateway: Arc<A>,
}

impl<A: AuthGateway> AuthService<A> {
    pub fn new(gateway: Arc<A>) -> Self {
        Self { gateway }
    }

    /// Logs in with an email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed email or an empty
    /// password. Backend failures carry the backend message or
    /// "Invalid credentials. Please try again.".
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let credentials = Credentials::new(email, password);
        credentials.validate()?;

        let session = self.gateway.login(credentials).await?;
        info!(user_id = %session.user.id, "Logged in");
        Ok(session)
    }

    /// Creates an account and logs into it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the password is shorter than
    /// [`MIN_PASSWORD_LENGTH`] or the email is malformed.
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(
                "Password must be at least 6 characters long.",
                json!({ "field": "password", "min_length": MIN_PASSWORD_LENGTH }),
            ));
        }

        let credentials = Credentials::new(email, password);
        credentials.validate()?;

        let session = self.gateway.register(credentials).await?;
        info!(user_id = %session.user.id, "Account registered");
        Ok(session)
    }
}
