//! One-shot upgrade of persisted layouts.
//!
//! Stored layouts are decoded into [`RawPlacement`] records first, where
//! spans may be missing (older payloads omitted them). Each [`Migration`]
//! then gets a chance to detect and rewrite an obsolete schema before the
//! records are normalised into a [`Layout`].
//!
//! The only migration today is [`ColumnScaleMigration`], which upgrades
//! layouts saved under the 12-column grid. It guesses the scale from the
//! full-width `stats` widget; swapping in an explicit version field means
//! adding another [`Migration`] and nothing else.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::grid::{DEFAULT_ROW_SPAN, GRID_COLUMNS, LEGACY_GRID_COLUMNS, LEGACY_SCALE_RATIO};
use crate::layout::{Layout, LayoutError, WidgetPlacement};

/// A placement as found in storage, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlacement {
    /// Stored id.
    pub id: String,
    /// Stored widget type.
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Stored column span, if any.
    #[serde(default)]
    pub col_span: Option<i64>,
    /// Stored row span, if any.
    #[serde(default)]
    pub row_span: Option<i64>,
    /// Stored title override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Stored widget options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

/// Failure to turn a stored payload into a layout.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The payload is not a JSON array of placements.
    #[error("Malformed layout payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The placements decode but do not form a valid layout.
    #[error("Invalid layout: {0}")]
    Shape(#[from] LayoutError),
}

/// A named, isolated schema upgrade.
pub trait Migration: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns `true` if `raw` was produced under the obsolete schema.
    fn detect(&self, raw: &[RawPlacement]) -> bool;

    /// Rewrites `raw` in place into the current schema.
    fn apply(&self, raw: &mut [RawPlacement]);
}

/// Upgrades layouts saved under a coarser column count.
///
/// Detection: a placement of `anchor_type` whose column span (missing
/// counts as the legacy maximum) is at or below `legacy_columns`. The
/// anchor is full width under the current scale, so it only looks that
/// narrow in an old-scale layout. Upgrading multiplies every column span by
/// `ratio`; row spans are untouched.
#[derive(Debug, Clone)]
pub struct ColumnScaleMigration {
    /// Widget type expected to be full width.
    pub anchor_type: &'static str,
    /// Column count of the old grid.
    pub legacy_columns: u16,
    /// Multiplier from old to new columns.
    pub ratio: u16,
}

impl Default for ColumnScaleMigration {
    fn default() -> Self {
        Self {
            anchor_type: "stats",
            legacy_columns: LEGACY_GRID_COLUMNS,
            ratio: LEGACY_SCALE_RATIO,
        }
    }
}

impl Migration for ColumnScaleMigration {
    fn name(&self) -> &'static str {
        "column-scale-12-to-48"
    }

    fn detect(&self, raw: &[RawPlacement]) -> bool {
        let legacy = self.legacy_columns as i64;
        raw.iter().any(|p| {
            p.widget_type == self.anchor_type && p.col_span.unwrap_or(legacy) <= legacy
        })
    }

    fn apply(&self, raw: &mut [RawPlacement]) {
        let legacy = self.legacy_columns as i64;
        for p in raw {
            p.col_span = Some(p.col_span.unwrap_or(legacy).saturating_mul(self.ratio as i64));
        }
    }
}

/// A decoded and upgraded layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Upgraded {
    /// The resulting layout.
    pub layout: Layout,
    /// Names of the migrations that ran, in order.
    pub applied: Vec<&'static str>,
}

impl Upgraded {
    /// Returns `true` if any migration rewrote the payload.
    pub fn migrated(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Runs an ordered list of migrations over stored layouts.
pub struct LayoutMigrator {
    migrations: Vec<Box<dyn Migration>>,
}

impl std::fmt::Debug for LayoutMigrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutMigrator")
            .field(
                "migrations",
                &self.migrations.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl LayoutMigrator {
    /// Creates a migrator with the built-in migrations.
    pub fn new() -> Self {
        Self::with_migrations(vec![Box::new(ColumnScaleMigration::default())])
    }

    /// Creates a migrator running exactly `migrations`, in order.
    pub fn with_migrations(migrations: Vec<Box<dyn Migration>>) -> Self {
        Self { migrations }
    }

    /// Runs every detecting migration over `raw`.
    ///
    /// Returns the names of the migrations that applied.
    pub fn upgrade(&self, raw: &mut [RawPlacement]) -> Vec<&'static str> {
        let mut applied = Vec::new();
        for migration in &self.migrations {
            if migration.detect(raw) {
                migration.apply(raw);
                tracing::info!(migration = migration.name(), "migrated stored layout");
                applied.push(migration.name());
            }
        }
        applied
    }

    /// Decodes a stored JSON payload, upgrades it and normalises it.
    pub fn decode(&self, payload: &str) -> Result<Upgraded, DecodeError> {
        let mut raw: Vec<RawPlacement> = serde_json::from_str(payload)?;
        let applied = self.upgrade(&mut raw);
        let layout = normalize(raw)?;
        Ok(Upgraded { layout, applied })
    }
}

impl Default for LayoutMigrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns raw records into a validated layout.
///
/// Missing or zero column spans become full width, missing or zero row
/// spans become the default row span, and all spans are clamped.
pub fn normalize(raw: Vec<RawPlacement>) -> Result<Layout, LayoutError> {
    let placements = raw
        .into_iter()
        .map(|r| {
            let mut placement = WidgetPlacement::new(
                &r.id,
                &r.widget_type,
                stored_span(r.col_span).unwrap_or(GRID_COLUMNS as i64),
                stored_span(r.row_span).unwrap_or(DEFAULT_ROW_SPAN as i64),
            );
            placement.title = r.title;
            placement.config = r.config;
            placement
        })
        .collect();
    Layout::from_placements(placements)
}

/// A stored span of zero means "unset", same as a missing one.
fn stored_span(span: Option<i64>) -> Option<i64> {
    span.filter(|s| *s != 0)
}
