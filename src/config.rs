//! Console configuration loaded from environment variables.
//!
//! Configuration is loaded once when the embedding application starts the
//! console session and validated before any request is sent.
//!
//! ```bash
//! export API_BASE_URL="https://api.short.example"
//! export API_TOKEN="eyJhbGciOi..."     # optional, usually set after login
//! export PAGE_SIZE=10
//! ```
//!
//! ## Required Variables
//!
//! - `API_BASE_URL` - Base URL of the link backend (`http://` or `https://`)
//!
//! ## Optional Variables
//!
//! - `API_TOKEN` - Bearer credential attached to every request
//! - `PAGE_SIZE` - Records per page in the links view (default: 10, 1..=100)
//! - `REQUEST_TIMEOUT_SECS` - Transport timeout (default: 30)
//! - `RECENT_LINKS_LIMIT` - Records shown on the overview (default: 5)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// Bearer credential; `None` until the user has logged in.
    pub api_token: Option<String>,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub recent_links_limit: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            api_token: None,
            page_size: 10,
            request_timeout_secs: 30,
            recent_links_limit: 5,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `API_BASE_URL` is missing.
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("API_BASE_URL").context("API_BASE_URL must be set")?;

        let api_token = env::var("API_TOKEN").ok().filter(|t| !t.is_empty());

        let page_size = env::var("PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let recent_links_limit = env::var("RECENT_LINKS_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_token,
            page_size,
            request_timeout_secs,
            recent_links_limit,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_base_url` is not an absolute http(s) URL
    /// - `page_size` is outside 1..=100
    /// - `request_timeout_secs` is 0
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "API_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.api_base_url
            );
        }

        url::Url::parse(&self.api_base_url)
            .with_context(|| format!("API_BASE_URL is not a valid URL: '{}'", self.api_base_url))?;

        if !(1..=100).contains(&self.page_size) {
            anyhow::bail!("PAGE_SIZE must be between 1 and 100, got {}", self.page_size);
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API base URL: {}", self.api_base_url);
        match self.api_token {
            Some(ref token) => tracing::info!("  API token: {}", mask_token(token)),
            None => tracing::info!("  API token: not set"),
        }
        tracing::info!("  Page size: {}", self.page_size);
        tracing::info!("  Request timeout: {}s", self.request_timeout_secs);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Keeps the first four characters of a credential and hides the rest.
fn mask_token(token: &str) -> String {
    if token.chars().count() <= 8 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}***")
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in the embedding binary).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefghijkl"), "abcd***");
        assert_eq!(mask_token("short"), "***");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.page_size = 0;
        assert!(config.validate().is_err());
        config.page_size = 101;
        assert!(config.validate().is_err());
        config.page_size = 10;

        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.request_timeout_secs = 30;

        config.api_base_url = "ftp://files.example".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_and_trailing_slash() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("API_BASE_URL", "https://api.example.com/");
            env::remove_var("API_TOKEN");
            env::remove_var("PAGE_SIZE");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert!(config.api_token.is_none());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.recent_links_limit, 5);

        unsafe {
            env::remove_var("API_BASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_base_url() {
        unsafe {
            env::remove_var("API_BASE_URL");
        }
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_empty_token_is_ignored() {
        unsafe {
            env::set_var("API_BASE_URL", "http://localhost:8080");
            env::set_var("API_TOKEN", "");
            env::set_var("PAGE_SIZE", "25");
        }

        let config = load_from_env().unwrap();
        assert!(config.api_token.is_none());
        assert_eq!(config.page_size, 25);

        unsafe {
            env::remove_var("API_BASE_URL");
            env::remove_var("API_TOKEN");
            env::remove_var("PAGE_SIZE");
        }
    }
}
