//! Command implementations for the dgrid CLI.
//!
//! This module contains all command handler functions, organized by domain:
//! - `config` - configuration file management
//! - `layout` - scripted layout edits and listings
//! - `tui` - the interactive terminal dashboard

pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod tui;

pub(crate) use config::*;
pub(crate) use layout::*;
pub(crate) use tui::*;

use dashboard_grid::config::{Config, ConfigError, ConfigLoader};
use dashboard_grid::grid::{Axis, ROW_UNIT_PX};
use dashboard_grid::interaction::{DragReorderController, LimitPulse, ResizeController};
use dashboard_grid::layout::{LayoutError, Preset, PresetCatalog};
use dashboard_grid::persist::{FileBackend, LayoutPersistence, UserScope};
use dashboard_grid::store::LayoutStore;
use dashboard_grid::widgets::{RemoteWidgetDefinition, WidgetRegistry};
use std::path::PathBuf;
use std::time::Duration;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub(crate) struct GlobalArgs {
    /// Explicit config file.
    pub config: Option<PathBuf>,
    /// User scope override.
    pub user: Option<String>,
    /// Layout directory override.
    pub data_dir: Option<PathBuf>,
}

/// Resolved configuration plus CLI overrides.
#[derive(Debug)]
pub(crate) struct Context {
    pub config: Config,
    pub scope: UserScope,
    pub layouts_dir: PathBuf,
}

impl Context {
    /// Loads and validates the config, then applies `--user` and `--data-dir`.
    pub(crate) fn resolve(globals: &GlobalArgs) -> Result<Self, ConfigError> {
        let config = ConfigLoader::load(globals.config.as_deref())?;
        config.validate()?;
        let scope = UserScope::new(
            globals
                .user
                .as_deref()
                .unwrap_or(config.persistence.user.as_str()),
        );
        let layouts_dir = globals
            .data_dir
            .clone()
            .unwrap_or_else(|| config.persistence.layouts_dir());
        Ok(Self {
            config,
            scope,
            layouts_dir,
        })
    }

    /// Opens the layout store for the resolved scope on the file backend.
    ///
    /// The registry and preset catalog include whatever the `[widgets]`
    /// data files add.
    pub(crate) fn open_store(&self) -> Result<LayoutStore, ConfigError> {
        let registry = self.registry()?;
        let presets = self.presets(&registry)?;
        let backend = FileBackend::new(&self.layouts_dir);
        tracing::debug!(
            dir = %self.layouts_dir.display(),
            scope = %self.scope,
            "opening layout store"
        );
        let persistence = LayoutPersistence::new(Box::new(backend), self.scope.clone());
        Ok(LayoutStore::open(registry, persistence).with_presets(presets))
    }

    /// Built-in registry with `[widgets] definitions` applied.
    fn registry(&self) -> Result<WidgetRegistry, ConfigError> {
        let mut registry = WidgetRegistry::builtin();
        if let Some(path) = self.config.widgets.definitions_path() {
            let remote: Vec<RemoteWidgetDefinition> = ConfigLoader::load_json(&path)?;
            let applied = registry.apply_remote(&remote);
            tracing::debug!(
                path = %path.display(),
                applied,
                ignored = remote.len() - applied,
                "widget definitions loaded"
            );
        }
        Ok(registry)
    }

    /// Built-in presets plus those from `[widgets] presets`.
    fn presets(&self, registry: &WidgetRegistry) -> Result<PresetCatalog, ConfigError> {
        let mut catalog = PresetCatalog::new();
        if let Some(path) = self.config.widgets.presets_path() {
            let extra: Vec<Preset> = ConfigLoader::load_json(&path)?;
            for preset in extra {
                check_preset(&preset, registry).map_err(|e| ConfigError::InvalidValue {
                    field: "widgets.presets",
                    message: format!("preset '{}': {e}", preset.name),
                })?;
                tracing::debug!(preset = %preset.name, "preset registered");
                catalog.register(preset);
            }
        }
        Ok(catalog)
    }

    /// Interaction controllers and tick rate from the `[grid]` and `[tui]` sections.
    pub(crate) fn interaction(
        &self,
    ) -> Result<(DragReorderController, ResizeController, Duration), ConfigError> {
        let pulse = LimitPulse::new(self.config.grid.limit_pulse()?);
        let drag = DragReorderController::new(self.config.grid.drag_activation_distance);
        let resize = ResizeController::new(ROW_UNIT_PX, pulse);
        Ok((drag, resize, self.config.tui.tick_rate()?))
    }

    /// Log file from `[log] file`, if set.
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        let file = self.config.log.file.trim();
        (!file.is_empty()).then(|| dashboard_grid::config::xdg::expand_tilde(file))
    }
}

/// Rejects presets that could not be applied as stored.
fn check_preset(preset: &Preset, registry: &WidgetRegistry) -> Result<(), String> {
    preset.to_layout().map_err(|e| e.to_string())?;
    for placement in &preset.layout {
        if !registry.contains(&placement.widget_type) {
            return Err(LayoutError::UnknownWidgetType {
                widget_type: placement.widget_type.clone(),
            }
            .to_string());
        }
        for axis in [Axis::Width, Axis::Height] {
            let span = placement.span(axis);
            if !axis.in_bounds(span as i64) {
                return Err(format!("{} {axis} {span} is out of range", placement.id));
            }
        }
    }
    Ok(())
}
