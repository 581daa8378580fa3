//! Platform-aware path resolution for dashboard-grid.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/dashboard-grid` or `~/.config/dashboard-grid`
//! - Data: `$XDG_DATA_HOME/dashboard-grid` or `~/.local/share/dashboard-grid`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config: `$XDG_CONFIG_HOME/dashboard-grid` or `~/Library/Application Support/dashboard-grid`
//! - Data: `$XDG_DATA_HOME/dashboard-grid` or `~/Library/Application Support/dashboard-grid`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "dashboard-grid";

/// Returns the configuration directory for dashboard-grid.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/dashboard-grid` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/dashboard-grid`
///    - macOS: `~/Library/Application Support/dashboard-grid`
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home().join(".config")
    }
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory for dashboard-grid.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/dashboard-grid` (if env var set, any platform)
/// 2. Platform default from `dirs::data_dir()`
pub fn data_dir() -> PathBuf {
    if let Some(xdg) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    dirs::data_dir()
        .unwrap_or_else(|| home().join(".local").join("share"))
        .join(APP_NAME)
}

/// Returns the directory holding per-user layout files.
pub fn layouts_dir() -> PathBuf {
    data_dir().join("layouts")
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else if path == "~" {
        home()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
///
/// Equivalent to `mkdir -p` with restricted permissions.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Run a closure with `key` temporarily set, then restore.
    fn with_env<F: FnOnce()>(key: &str, value: &str, f: F) {
        let original = std::env::var(key).ok();
        std::env::set_var(key, value);
        f();
        match original {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    #[test]
    #[serial]
    fn config_dir_honours_xdg_override() {
        with_env("XDG_CONFIG_HOME", "/tmp/xdg-config", || {
            assert_eq!(config_dir(), PathBuf::from("/tmp/xdg-config/dashboard-grid"));
            assert_eq!(
                config_path(),
                PathBuf::from("/tmp/xdg-config/dashboard-grid/config.toml")
            );
        });
    }

    #[test]
    #[serial]
    fn layouts_dir_honours_xdg_data_override() {
        with_env("XDG_DATA_HOME", "/tmp/xdg-data", || {
            assert_eq!(
                layouts_dir(),
                PathBuf::from("/tmp/xdg-data/dashboard-grid/layouts")
            );
        });
    }

    #[test]
    #[serial]
    fn empty_xdg_value_falls_back_to_platform() {
        with_env("XDG_CONFIG_HOME", "", || {
            assert!(config_dir().ends_with("dashboard-grid"));
            assert_ne!(config_dir(), PathBuf::from("dashboard-grid"));
        });
    }

    #[test]
    fn expand_tilde_variants() {
        let home = home();
        assert_eq!(expand_tilde("~/layouts"), home.join("layouts"));
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("/srv/x"), PathBuf::from("/srv/x"));
        assert_eq!(expand_tilde("rel/~"), PathBuf::from("rel/~"));
    }

    #[cfg(unix)]
    #[test]
    fn ensure_dir_sets_owner_only_mode() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let target = tmp.path().join("a").join("b");
        ensure_dir(&target).expect("should create");
        let mode = fs::metadata(&target).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
