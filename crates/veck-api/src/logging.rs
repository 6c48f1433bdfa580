//! File-backed tracing setup.
//!
//! The TUI owns the terminal, so logs go to `$VECK_HOME/veck.log`. Filtering
//! is controlled with `VECK_LOG` (env-filter syntax), defaulting to `info`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. The returned guard must be kept alive
/// for the duration of the process or buffered log lines are dropped.
pub fn init(home: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(home)
        .with_context(|| format!("failed to create {}", home.display()))?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(home.join("veck.log"))
        .with_context(|| format!("failed to open log file in {}", home.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_env("VECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init so tests that initialize twice don't panic.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(guard)
}
