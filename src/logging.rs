//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over the configured level. The terminal
//! dashboard owns the screen, so it should log to a file; the report binary
//! logs to stderr by default.

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Build the level filter for `config`.
///
/// # Errors
///
/// Returns [`Error::Logging`] if the configured directive does not parse.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| Error::Logging(format!("invalid level {:?}: {e}", config.level))),
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`Error::Logging`] if the filter is invalid, the log file cannot
/// be opened, or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let fmt_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| Error::Logging(format!("{}: {e}", path.display())))?;
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .boxed()
        }
        None => tracing_subscriber::fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
