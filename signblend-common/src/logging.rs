//! Logging bootstrap
//!
//! Installs a `tracing-subscriber` registry driven by [`LoggingConfig`].
//! `RUST_LOG` takes precedence over the configured level.

use crate::config::LoggingConfig;
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter: environment first, configured level as fallback
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize global logging
///
/// Returns `Ok(false)` if a global subscriber was already installed (e.g. by a
/// host application or a previous call); that case is not an error.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let filter = build_filter(config);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Cannot open log file {}: {}", path.display(), e))
                })?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .is_ok()
        }
        None => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::debug!("Logging initialized at level '{}'", config.level);
    }

    Ok(installed)
}
