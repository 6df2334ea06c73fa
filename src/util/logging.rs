//! Tracing subscriber setup for hosts embedding the overlay

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "screenshot_overlay=info";

/// Installs a global fmt subscriber filtered by `RUST_LOG`
///
/// Falls back to `default_filter` (or [`DEFAULT_FILTER`]) when the
/// environment has no filter. Fails if a global subscriber already exists.
pub fn init_tracing(default_filter: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter.unwrap_or(DEFAULT_FILTER)))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

/// Same as [`init_tracing`] but emits JSON lines, for log shippers
pub fn init_json_tracing(default_filter: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter.unwrap_or(DEFAULT_FILTER)))?;

    fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
