//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` fmt subscriber driven by [`LoggingConfig`].
//! `RUST_LOG`, when set, takes precedence over the configured level.

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{RconError, Result};

/// Install the global subscriber. Returns an error if one is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| RconError::ConfigError(format!("Failed to install subscriber: {e}")))?;
    debug!(app = %config.app_name, "Logging initialized");
    Ok(())
}

/// Like [`init`], but ignores an already-installed subscriber.
pub fn try_init(config: &LoggingConfig) {
    let _ = init(config);
}
