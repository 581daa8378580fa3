//! Logging initialization for dashboard-grid.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `DGRID_LOG` environment variable. When the variable is unset or invalid
//! the level from the `[log]` config section is used.
//!
//! # Usage
//!
//! ```bash
//! # Configured level (info unless changed in config.toml)
//! dgrid layout show
//!
//! # Debug level
//! DGRID_LOG=debug dgrid layout show
//!
//! # Module-specific filtering
//! DGRID_LOG=dashboard_grid::persist=trace,warn dgrid tui
//! ```
//!
//! Commands log to stderr. The terminal dashboard owns the screen, so it
//! logs to the configured file or not at all.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "DGRID_LOG";

/// Builds the filter: `DGRID_LOG` if it parses, otherwise `level`.
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize the tracing subscriber writing to stderr.
///
/// Does nothing if a global subscriber is already installed.
pub fn init(level: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize logging for the terminal dashboard.
///
/// With a `file`, log lines are appended there without ANSI colours.
/// Without one, nothing is installed and all events are dropped.
pub fn init_for_tui(level: LogLevel, file: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = file else {
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();
    Ok(())
}
