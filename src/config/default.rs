//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Dashboard Grid Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/dashboard-grid/config.toml

# ==============================================================================
# Grid interactions
# ==============================================================================

[grid]

# How long the "limit reached" indicator shows when a resize hits a bound.
# Examples: "300ms", "500ms", "1s"
limit_pulse = "300ms"

# Pointer travel (in pixel-equivalents) before a press turns into a drag.
# One terminal cell counts as 10.
drag_activation_distance = 8.0

# ==============================================================================
# Terminal dashboard
# ==============================================================================

[tui]

# Redraw tick; also how quickly the limit indicator clears.
# Examples: "100ms", "250ms"
tick_rate = "100ms"

# Open the dashboard with edit mode (drag and resize) already on.
start_in_edit_mode = false

# ==============================================================================
# Persistence
# ==============================================================================

[persistence]

# User scope the layout is stored under. Each user gets its own file.
user = "default"

# Directory holding layout files.
# Empty means $XDG_DATA_HOME/dashboard-grid/layouts.
# Tilde (~) is expanded to the user's home directory.
dir = ""

# ==============================================================================
# Widgets
# ==============================================================================

[widgets]

# JSON array of widget definition overrides, as served by the dashboard API:
#   [{ "slug": "notes", "name": "Team Notes", "default_config": { "maxNotes": 3 } }]
# Entries for unknown widget types are ignored. Empty means none.
definitions = ""

# JSON array of extra layout presets:
#   [{ "name": "lobby", "description": "...", "layout": [{ "id": "notes-1",
#      "type": "notes", "colSpan": 24, "rowSpan": 10 }] }]
# A preset with a built-in name replaces it. Empty means none.
presets = ""

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Logging verbosity level. The DGRID_LOG environment variable overrides it.
# Options: "error", "warn", "info", "debug", "trace"
level = "info"

# Path to log file.
# Empty means stderr for commands; the terminal dashboard then logs nothing.
file = ""
"#;

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Writes the default template to `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;

    // -- Template validity --------------------------------------------------

    #[test]
    fn template_values_match_config_default() {
        let from_template: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(from_template, Config::default());
    }

    #[test]
    fn template_contains_all_section_headers() {
        for header in ["[grid]", "[tui]", "[persistence]", "[widgets]", "[log]"] {
            assert!(
                DEFAULT_CONFIG_TEMPLATE.contains(header),
                "missing {header} section"
            );
        }
    }

    // -- create_default_config_at -------------------------------------------

    #[test]
    fn create_writes_template_and_parents() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp.path().join("dashboard-grid/config.toml");
        create_default_config_at(&path, false).expect("should succeed");
        let content = fs::read_to_string(&path).expect("should read");
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn create_without_force_returns_already_exists() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp.path().join("config.toml");
        create_default_config_at(&path, false).expect("first call should succeed");
        let err = create_default_config_at(&path, false).expect_err("should fail");
        match err {
            ConfigError::AlreadyExists { .. } => {}
            other => panic!("expected AlreadyExists, got: {other:?}"),
        }
    }

    #[test]
    fn create_with_force_creates_backup() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "# custom content\n").expect("write custom");

        create_default_config_at(&path, true).expect("force should succeed");

        let backup = path.with_extension("toml.backup");
        let backup_content = fs::read_to_string(&backup).expect("read backup");
        assert_eq!(backup_content, "# custom content\n");
        let content = fs::read_to_string(&path).expect("read new");
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[cfg(unix)]
    #[test]
    fn file_permissions_are_0600() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let path = tmp.path().join("config.toml");
        create_default_config_at(&path, false).expect("should succeed");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600, "file should be owner-only read/write");
    }
}
