//! Client-side checks on user-entered URLs and short-link formatting.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Checks that a user-entered destination is an absolute http(s) URL.
///
/// Returns the trimmed input unchanged; canonicalization is left to the
/// backend so the stored URL is exactly what the user typed.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for malformed URLs, other schemes
/// (`javascript:`, `ftp:`, ...) and URLs without a host.
pub fn validate_original_url(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(
            "Please enter a URL.",
            json!({ "field": "originalUrl" }),
        ));
    }

    let url = Url::parse(trimmed).map_err(|e| {
        AppError::validation(
            "Please enter a valid URL.",
            json!({ "field": "originalUrl", "reason": e.to_string() }),
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation(
            "Only HTTP and HTTPS URLs are allowed.",
            json!({ "field": "originalUrl", "scheme": url.scheme() }),
        ));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(
            "Please enter a valid URL.",
            json!({ "field": "originalUrl", "reason": "missing host" }),
        ));
    }

    Ok(trimmed.to_string())
}

/// Public short link for a code: `{base}/api/urls/{code}`.
pub fn short_url(base: &str, code: &str) -> String {
    format!("{}/api/urls/{}", base.trim_end_matches('/'), code)
}
