//! Built-in layout presets.
//!
//! A preset is a named template layout applied wholesale, replacing the
//! current layout. Three built-in presets are provided:
//! - **default** (shortcut `1`): the layout every user starts with
//! - **operations** (shortcut `2`): bookings, calendar, occupancy and staff
//! - **finance** (shortcut `3`): revenue figures, charts and the table
//!
//! Extra presets (for example templates served by the dashboard API) can be
//! registered at runtime.

use serde::Deserialize;

use crate::layout::{Layout, LayoutError, WidgetPlacement};

/// A named template layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preset {
    /// Name used to select the preset.
    pub name: String,
    /// Short human-readable summary.
    #[serde(default)]
    pub description: String,
    /// Placements applied verbatim, ids included.
    pub layout: Vec<WidgetPlacement>,
}

impl Preset {
    /// Creates a preset from `(id, type, colSpan, rowSpan)` tuples.
    pub fn new(name: &str, description: &str, placements: &[(&str, &str, i64, i64)]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            layout: placements
                .iter()
                .map(|(id, widget_type, cols, rows)| {
                    WidgetPlacement::new(id, widget_type, *cols, *rows)
                })
                .collect(),
        }
    }

    /// Builds the layout this preset describes.
    pub fn to_layout(&self) -> Result<Layout, LayoutError> {
        Layout::from_placements(self.layout.clone())
    }
}

/// The set of presets available to a dashboard.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Creates a catalog with the built-in presets.
    pub fn new() -> Self {
        let default = Preset {
            name: "default".to_string(),
            description: "Overview, quarter, revenue trend and schedule".to_string(),
            layout: Layout::builtin_default().into_placements(),
        };
        let operations = Preset::new(
            "operations",
            "Upcoming bookings, calendar, occupancy and staff",
            &[
                ("stats-1", "stats", 48, 6),
                ("upcoming-1", "upcoming", 24, 20),
                ("calendar-1", "calendar", 12, 16),
                ("occupancy-1", "occupancy-chart", 12, 14),
                ("team-1", "team", 24, 12),
                ("notes-1", "notes", 24, 12),
            ],
        );
        let finance = Preset::new(
            "finance",
            "Revenue figures, trends and per-room breakdown",
            &[
                ("stats-1", "stats", 48, 6),
                ("revenue-1", "revenue", 24, 12),
                ("quarterly-1", "quarterly-stats", 24, 12),
                ("revenue-chart-1", "revenue-chart", 48, 16),
                ("revenue-table-1", "revenue-table", 48, 20),
            ],
        );
        Self {
            presets: vec![default, operations, finance],
        }
    }

    /// Adds a preset, replacing any existing preset with the same name.
    pub fn register(&mut self, preset: Preset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    /// Looks up a preset by name.
    pub fn get(&self, name: &str) -> Result<&Preset, LayoutError> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| LayoutError::UnknownPreset {
                name: name.to_string(),
            })
    }

    /// Looks up a preset by its 1-based shortcut index.
    pub fn by_index(&self, index: u8) -> Option<&Preset> {
        (index as usize)
            .checked_sub(1)
            .and_then(|i| self.presets.get(i))
    }

    /// Returns the count of available presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Returns `true` if no presets are available.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Iterates over all presets in shortcut order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Returns an iterator over all preset names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::WidgetRegistry;

    #[test]
    fn builtin_names_in_shortcut_order() {
        let catalog = PresetCatalog::new();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["default", "operations", "finance"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn default_preset_matches_builtin_layout() {
        let catalog = PresetCatalog::new();
        let layout = catalog
            .get("default")
            .and_then(Preset::to_layout)
            .expect("valid preset");
        assert_eq!(layout, Layout::builtin_default());
    }

    #[test]
    fn every_builtin_preset_uses_known_types() {
        let registry = WidgetRegistry::builtin();
        for preset in PresetCatalog::new().iter() {
            let layout = preset.to_layout().expect("unique ids");
            for placement in layout.iter() {
                assert!(
                    registry.contains(&placement.widget_type),
                    "{} uses unknown type {}",
                    preset.name,
                    placement.widget_type
                );
            }
        }
    }

    #[test]
    fn unknown_name_is_error() {
        let catalog = PresetCatalog::new();
        let err = catalog.get("weekend").expect_err("no such preset");
        assert_eq!(
            err,
            LayoutError::UnknownPreset {
                name: "weekend".into()
            }
        );
    }

    #[test]
    fn by_index_is_one_based() {
        let catalog = PresetCatalog::new();
        assert_eq!(catalog.by_index(1).map(|p| p.name.as_str()), Some("default"));
        assert_eq!(catalog.by_index(3).map(|p| p.name.as_str()), Some("finance"));
        assert!(catalog.by_index(0).is_none());
        assert!(catalog.by_index(4).is_none());
    }

    #[test]
    fn register_replaces_same_name() {
        let mut catalog = PresetCatalog::new();
        catalog.register(Preset::new("finance", "slim", &[("r", "revenue", 24, 12)]));
        catalog.register(Preset::new("notes", "just notes", &[("n", "notes", 12, 8)]));
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("finance").map(|p| p.layout.len()), Ok(1));
    }

    #[test]
    fn deserializes_api_template() {
        let json = r#"{
            "name": "Weekend",
            "layout": [{ "id": "n", "type": "notes", "colSpan": 12, "rowSpan": 8 }]
        }"#;
        let preset: Preset = serde_json::from_str(json).expect("valid template");
        assert_eq!(preset.description, "");
        assert_eq!(preset.to_layout().map(|l| l.len()), Ok(1));
    }
}
