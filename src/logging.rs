//! File-backed structured logging. The TUI owns the terminal, so log output
//! goes to a file in the data directory instead of stderr; ANSI styling is
//! disabled for the same reason.
//!
//! Activation: the default level is `info`, and `RUST_LOG` overrides it.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Default filter applied when `RUST_LOG` is unset.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialise the logging subsystem, appending to `log_file`.
///
/// Must be called once, before the terminal enters raw mode, so that any
/// startup diagnostics land in the file rather than the alternate screen.
pub fn init(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file '{}'", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true)
        .compact()
        .init();

    tracing::debug!(log = %log_file.display(), "logging initialised");
    Ok(())
}
