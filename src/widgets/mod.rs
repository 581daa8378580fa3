//! Widget registry for the dashboard grid.
//!
//! This module defines [`WidgetDefinition`], the read-only description of a
//! widget type (title, default size, configurable options), and the
//! [`WidgetRegistry`] that maps type identifiers to definitions.
//!
//! # Architecture
//!
//! The grid engine never renders widget content itself. It consults the
//! registry at three points only:
//!
//! - when a widget is added (default spans),
//! - when a resize commits (per-type minimum spans),
//! - when the layout is packed (unknown types are skipped).
//!
//! Remote definitions fetched by the surrounding application can override
//! titles, descriptions and default options of known types through
//! [`WidgetRegistry::apply_remote`]. Types that exist only remotely are
//! ignored, since there is nothing local to render them with.
//!
//! # Example
//!
//! ```
//! use dashboard_grid::widgets::WidgetRegistry;
//!
//! let registry = WidgetRegistry::builtin();
//! let notes = registry.get("notes").expect("notes is built in");
//! assert_eq!((notes.default_col_span, notes.default_row_span), (12, 8));
//! assert!(registry.get("nonexistent").is_none());
//! ```

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::grid::{Axis, MIN_COL_SPAN, MIN_ROW_SPAN};
use crate::layout::WidgetPlacement;

/// Read-only description of a widget type.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDefinition {
    /// Type identifier referenced by placements.
    pub widget_type: &'static str,
    /// Display title.
    pub title: String,
    /// One-line description shown in the add-widget panel.
    pub description: String,
    /// Column span given to freshly added placements.
    pub default_col_span: u16,
    /// Row span given to freshly added placements.
    pub default_row_span: u16,
    /// Per-type minimum column span, if stricter than the grid minimum.
    pub min_col_span: Option<u16>,
    /// Per-type minimum row span, if stricter than the grid minimum.
    pub min_row_span: Option<u16>,
    /// Option keys a placement may override through its `config`.
    pub configurable_options: &'static [&'static str],
    /// Default option values, merged under a placement's `config`.
    pub default_config: Map<String, Value>,
}

impl WidgetDefinition {
    /// Minimum span enforced on `axis` when a resize commits.
    pub fn min_span(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Width => self.min_col_span.unwrap_or(MIN_COL_SPAN).max(MIN_COL_SPAN),
            Axis::Height => self.min_row_span.unwrap_or(MIN_ROW_SPAN).max(MIN_ROW_SPAN),
        }
    }

    /// Returns `true` if `key` may be set in a placement's `config`.
    pub fn supports_option(&self, key: &str) -> bool {
        self.configurable_options.contains(&key)
    }

    /// Default options overlaid with the placement's own `config`.
    pub fn merged_config(&self, placement: &WidgetPlacement) -> Map<String, Value> {
        let mut merged = self.default_config.clone();
        if let Some(config) = &placement.config {
            for (key, value) in config {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    /// Title to display for `placement`, honouring its override.
    pub fn display_title<'a>(&'a self, placement: &'a WidgetPlacement) -> &'a str {
        placement.title.as_deref().unwrap_or(&self.title)
    }
}

/// A widget definition as served by the remote API.
///
/// Only the fields the grid cares about are decoded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteWidgetDefinition {
    /// Type identifier; matches [`WidgetDefinition::widget_type`].
    pub slug: String,
    /// Display name override.
    #[serde(default)]
    pub name: Option<String>,
    /// Description override.
    #[serde(default)]
    pub description: Option<String>,
    /// Default option overrides, merged over the local defaults.
    #[serde(default)]
    pub default_config: Option<Map<String, Value>>,
}

/// Registry mapping widget type identifiers to definitions.
///
/// Definitions keep their registration order, which is the order the
/// add-widget panel lists them in.
#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    definitions: Vec<WidgetDefinition>,
}

impl WidgetRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Creates a registry holding the built-in dashboard widgets.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        for def in builtin_definitions() {
            reg.register(def);
        }
        reg
    }

    /// Registers a definition.
    ///
    /// Overwrites any existing definition of the same type in place, keeping
    /// its position in the listing.
    pub fn register(&mut self, definition: WidgetDefinition) {
        match self
            .definitions
            .iter_mut()
            .find(|d| d.widget_type == definition.widget_type)
        {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    /// Looks up a definition by type identifier.
    pub fn get(&self, widget_type: &str) -> Option<&WidgetDefinition> {
        self.definitions.iter().find(|d| d.widget_type == widget_type)
    }

    /// Returns `true` if `widget_type` is registered.
    pub fn contains(&self, widget_type: &str) -> bool {
        self.get(widget_type).is_some()
    }

    /// All definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &WidgetDefinition> {
        self.definitions.iter()
    }

    /// All registered type identifiers in registration order.
    pub fn available_types(&self) -> Vec<&'static str> {
        self.definitions.iter().map(|d| d.widget_type).collect()
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Applies remote overrides to known definitions.
    ///
    /// Returns how many remote entries matched a local definition.
    pub fn apply_remote(&mut self, remote: &[RemoteWidgetDefinition]) -> usize {
        let mut applied = 0;
        for entry in remote {
            let Some(local) = self
                .definitions
                .iter_mut()
                .find(|d| d.widget_type == entry.slug)
            else {
                tracing::debug!(slug = %entry.slug, "remote widget has no local definition, ignoring");
                continue;
            };
            if let Some(name) = entry.name.as_ref().filter(|n| !n.is_empty()) {
                local.title = name.clone();
            }
            if let Some(description) = entry.description.as_ref().filter(|d| !d.is_empty()) {
                local.description = description.clone();
            }
            if let Some(config) = &entry.default_config {
                for (key, value) in config {
                    local.default_config.insert(key.clone(), value.clone());
                }
            }
            applied += 1;
        }
        applied
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn config_of(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn definition(
    widget_type: &'static str,
    title: &str,
    description: &str,
    default_col_span: u16,
    default_row_span: u16,
    configurable_options: &'static [&'static str],
    default_config: Value,
) -> WidgetDefinition {
    WidgetDefinition {
        widget_type,
        title: title.to_string(),
        description: description.to_string(),
        default_col_span,
        default_row_span,
        min_col_span: None,
        min_row_span: None,
        configurable_options,
        default_config: config_of(default_config),
    }
}

fn builtin_definitions() -> Vec<WidgetDefinition> {
    vec![
        definition(
            "stats",
            "Overview",
            "Bookings, revenue and occupancy at a glance",
            48,
            6,
            &["showTrends", "columns", "refreshInterval", "visibleStats"],
            json!({
                "showTrends": true,
                "columns": 4,
                "refreshInterval": 60,
                "visibleStats": ["revenue", "bookings", "customers", "rooms"],
            }),
        ),
        definition(
            "upcoming",
            "Upcoming Sessions",
            "Next scheduled room sessions",
            24,
            20,
            &["limit", "showPastSessions", "refreshInterval"],
            json!({ "limit": 5, "showPastSessions": false, "refreshInterval": 30 }),
        ),
        definition(
            "team",
            "Team Status",
            "Who is clocked in and available",
            12,
            12,
            &["refreshInterval"],
            json!({ "refreshInterval": 60 }),
        ),
        definition(
            "revenue",
            "Revenue",
            "Simple monthly revenue chart",
            24,
            12,
            &["dateRange", "refreshInterval"],
            json!({ "dateRange": "month", "refreshInterval": 300 }),
        ),
        definition(
            "calendar",
            "Calendar",
            "Monthly or weekly booking calendar",
            12,
            16,
            &["defaultView", "showWeekends"],
            json!({ "defaultView": "month", "showWeekends": true }),
        ),
        definition(
            "notes",
            "Quick Notes",
            "Simple notepad",
            12,
            8,
            &["maxNotes"],
            json!({ "maxNotes": 10 }),
        ),
        definition(
            "revenue-chart",
            "Revenue vs Expenses",
            "Monthly comparison of income and costs",
            24,
            16,
            &["chartType", "showLegend", "dateRange"],
            json!({ "chartType": "bar", "showLegend": true, "dateRange": "month" }),
        ),
        definition(
            "occupancy-chart",
            "Occupancy by Room",
            "Distribution of bookings per room",
            12,
            14,
            &["showLegend", "dateRange"],
            json!({ "showLegend": true, "dateRange": "month" }),
        ),
        definition(
            "quarterly-stats",
            "Quarterly Summary",
            "Key figures for the current quarter",
            24,
            12,
            &["refreshInterval"],
            json!({ "refreshInterval": 300 }),
        ),
        definition(
            "revenue-table",
            "Transactions",
            "Detailed income ledger with filters",
            48,
            20,
            &["pageSize", "sortBy", "dateRange"],
            json!({ "pageSize": 10, "sortBy": "date", "dateRange": "month" }),
        ),
    ]
}
