//! A single widget's entry in the layout.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::grid::{clamp_col_span, clamp_row_span, Axis};

/// One placed widget: identity, type and size in grid units.
///
/// Serialises with the camelCase keys the dashboard API uses
/// (`type`, `colSpan`, `rowSpan`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPlacement {
    /// Stable identifier, unique within a layout.
    pub id: String,
    /// Registry type identifier.
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Width in grid columns, within `[1, 48]`.
    pub col_span: u16,
    /// Height in row units, at least 5.
    pub row_span: u16,
    /// Optional display-title override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Widget-specific options merged over the registry defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

impl WidgetPlacement {
    /// Creates a placement, clamping both spans into their bounds.
    pub fn new(id: &str, widget_type: &str, col_span: i64, row_span: i64) -> Self {
        Self {
            id: id.to_string(),
            widget_type: widget_type.to_string(),
            col_span: clamp_col_span(col_span),
            row_span: clamp_row_span(row_span),
            title: None,
            config: None,
        }
    }

    /// Span along `axis`.
    pub fn span(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Width => self.col_span,
            Axis::Height => self.row_span,
        }
    }

    /// Sets the span along `axis`, clamped into the axis bounds.
    ///
    /// Returns the value actually stored.
    pub fn set_span(&mut self, axis: Axis, span: i64) -> u16 {
        let clamped = axis.clamp(span);
        match axis {
            Axis::Width => self.col_span = clamped,
            Axis::Height => self.row_span = clamped,
        }
        clamped
    }

    /// Re-applies span bounds in place.
    pub(crate) fn normalize(&mut self) {
        self.col_span = clamp_col_span(self.col_span as i64);
        self.row_span = clamp_row_span(self.row_span as i64);
    }
}
