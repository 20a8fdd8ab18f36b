//! Tracing subscriber setup.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber according to `LOG_FORMAT`.
///
/// `RUST_LOG` takes precedence over [`Config::log_level`]. Calling this more
/// than once is harmless: the second installation attempt is ignored.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let result = if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
