//! File logging for the terminal binary.
//!
//! The game owns the terminal, so log output goes to a file named by
//! `MATCH3_LOG_PATH`. Without it no subscriber is installed and the core's
//! `tracing` events are discarded.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_VAR: &str = "MATCH3_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "MATCH3_LOG";

/// Install a file subscriber if `MATCH3_LOG_PATH` is set.
///
/// Returns whether logging was enabled.
pub fn init_from_env() -> Result<bool> {
    let Some(path) = std::env::var(LOG_PATH_VAR)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    Ok(true)
}
