//! TOML configuration schema types for the dashboard grid.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so an empty file is a valid configuration.
//!
//! Duration fields use human-readable strings (e.g. `"300ms"`, `"1s"`)
//! parsed by the `humantime` crate through the accessor methods.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [grid]
/// [tui]
/// [persistence]
/// [widgets]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Interaction tuning.
    pub grid: GridConfig,
    /// Terminal dashboard settings.
    pub tui: TuiConfig,
    /// Where layouts are stored.
    pub persistence: PersistenceConfig,
    /// Extra widget definitions and presets.
    pub widgets: WidgetsConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Checks every field that cannot be validated by deserialization alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.limit_pulse()?;
        self.tui.tick_rate()?;
        let distance = self.grid.drag_activation_distance;
        if !distance.is_finite() || distance < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "grid.drag_activation_distance",
                message: format!("must be a non-negative number, got {distance}"),
            });
        }
        Ok(())
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Drag and resize tuning.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// How long the "limit reached" pulse shows (e.g. `"300ms"`).
    pub limit_pulse: String,
    /// Pointer travel, in pixel-equivalents, before a press becomes a drag.
    pub drag_activation_distance: f64,
}

impl GridConfig {
    /// Parsed `limit_pulse`.
    pub fn limit_pulse(&self) -> Result<Duration, ConfigError> {
        parse_duration("grid.limit_pulse", &self.limit_pulse)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            limit_pulse: "300ms".to_string(),
            drag_activation_distance: 8.0,
        }
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// Terminal dashboard behaviour.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Render tick rate as a human-readable duration (e.g. `"100ms"`).
    pub tick_rate: String,
    /// Open the dashboard with edit mode already on.
    pub start_in_edit_mode: bool,
}

impl TuiConfig {
    /// Parsed `tick_rate`.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "100ms".to_string(),
            start_in_edit_mode: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Layout storage location.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PersistenceConfig {
    /// User scope the layout is stored under.
    pub user: String,
    /// Directory holding layout files. Empty means the XDG data location.
    pub dir: String,
}

impl PersistenceConfig {
    /// Directory layouts are read from and written to.
    pub fn layouts_dir(&self) -> PathBuf {
        if self.dir.trim().is_empty() {
            xdg::layouts_dir()
        } else {
            xdg::expand_tilde(self.dir.trim())
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            user: "default".to_string(),
            dir: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Data files extending the built-in registry and preset catalog.
///
/// Both hold JSON in the shape the dashboard API serves: an array of widget
/// definitions (`slug`, `name`, `description`, `default_config`) and an
/// array of templates (`name`, `description`, `layout`).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WidgetsConfig {
    /// Widget definition overrides. Empty means none.
    pub definitions: String,
    /// Extra layout presets. Empty means none.
    pub presets: String,
}

impl WidgetsConfig {
    /// Path of the definitions file, if one is configured.
    pub fn definitions_path(&self) -> Option<PathBuf> {
        optional_path(&self.definitions)
    }

    /// Path of the presets file, if one is configured.
    pub fn presets_path(&self) -> Option<PathBuf> {
        optional_path(&self.presets)
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| xdg::expand_tilde(trimmed))
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Logging configuration from the `[log]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Logging verbosity, overridden by `DGRID_LOG`.
    pub level: LogLevel,
    /// Path to log file. Empty means stderr for commands and no logging for
    /// the terminal dashboard.
    pub file: String,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
