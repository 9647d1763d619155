//! Telemetry initialisation for the `seal` command line.
//!
//! Structured JSON logs go to stderr so stdout carries only command output.
//! `RUST_LOG` overrides the configured level.
//!
//! # Telemetry invariants
//!
//! - **No plaintext or key material** appears in any log field.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise seal tracing subscriber: {e}"))
}
