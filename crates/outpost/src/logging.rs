//! Logging system setup and configuration
//!
//! This module handles the initialization of the tracing-based logging
//! system used throughout the server.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Args;

/// Initialize the logging system
///
/// Sets up structured logging using the tracing crate. The base level comes
/// from the `--debug` flag, `RUST_LOG` overrides it, and `--json-log`
/// switches to structured JSON output for log aggregation systems.
///
/// # Errors
/// Returns an error if a global subscriber was already installed.
pub fn setup_logging(args: &Args) -> Result<()> {
    let level = if args.debug { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if args.json_log {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(false))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()?;
    }

    Ok(())
}
