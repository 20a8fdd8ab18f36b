//! Error taxonomy shared by the gateways, the store and the console services.
//!
//! Errors never cross the store/consumer boundary as panics: the store records
//! them as a readable string in its snapshot, services turn them into form
//! errors, and only mutation calls hand them back to the caller.

use serde_json::{Value, json};

/// Errors produced while talking to the link backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    /// Network or HTTP failure, including timeouts and 401/403.
    #[error("{message}")]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    /// Rejected input, either by the backend (4xx on a mutation) or locally
    /// before a request was sent.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The addressed record does not exist (HTTP 404).
    #[error("{message}")]
    NotFound { message: String, details: Value },
}

impl AppError {
    pub fn fetch(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Fetch {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    /// Returns the HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            Self::Validation { .. } => None,
            Self::NotFound { .. } => Some(404),
        }
    }

    /// Human readable message suitable for an error banner.
    pub fn message(&self) -> &str {
        match self {
            Self::Fetch { message, .. }
            | Self::Validation { message, .. }
            | Self::NotFound { message, .. } => message,
        }
    }

    /// A `NotFound` on delete means the record is already gone; callers treat it as success.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Authentication failures are reported as fetch errors carrying 401/403.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        let status = e.status().map(|s| s.as_u16());
        if e.is_timeout() {
            return AppError::fetch(status, "Request timed out");
        }
        if e.is_decode() {
            return AppError::fetch(status, format!("Malformed response: {e}"));
        }
        AppError::fetch(status, format!("Network error: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<Value> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    json!({
                        "field": field,
                        "code": e.code,
                        "message": e.message,
                    })
                })
            })
            .collect();

        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());

        AppError::validation(message, json!({ "fields": fields }))
    }
}
