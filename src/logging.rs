//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout, so events go to the configured log file.
//! Without a log file nothing is installed and `tracing` macros are no-ops.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{Result, StoreError};

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` wins over `config.log_level`. Returns `Ok(false)` when logging
/// is disabled or a subscriber was already installed. Safe to call more than
/// once.
pub fn init(config: &Config) -> Result<bool> {
    let Some(ref path) = config.log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::Config(format!("cannot open log file {}: {e}", path.display())))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(log_file = %path.display(), "logging initialised");
    }
    Ok(installed)
}
