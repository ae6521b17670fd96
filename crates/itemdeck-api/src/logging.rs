//! Logging setup.
//!
//! Events go to stderr and, when a log directory is configured, are also
//! appended (without ANSI colours) to `api_{API_NAME}.log` in it. `RUST_LOG`
//! overrides the default filter. Records emitted through the `log` facade by
//! the library crates are forwarded into the same subscriber.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use itemdeck_core::{Error, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,itemdeck=debug";

/// Full path of the log file for `config`, if file logging is on.
pub fn log_file_path(config: &Config) -> Option<PathBuf> {
    config
        .log_dir
        .as_ref()
        .map(|dir| dir.join(config.log_file_name()))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an I/O error if the log file cannot be opened, or a
/// configuration error if a subscriber is already installed.
pub fn init(config: &Config) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = match log_file_path(config) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::config(format!("failed to install logger: {e}")))
}
