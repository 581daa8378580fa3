//! Grid resolution constants and span clamping.
//!
//! The dashboard grid is 48 columns wide. Heights are expressed in fixed
//! row units (10 px-equivalent each). Layouts saved before the switch to
//! 48 columns used a 12-column grid; see [`crate::layout::migrate`].

use std::fmt;

/// Total number of columns in the grid.
pub const GRID_COLUMNS: u16 = 48;

/// Column count of the legacy grid resolution.
pub const LEGACY_GRID_COLUMNS: u16 = 12;

/// Ratio between the current and the legacy column count.
pub const LEGACY_SCALE_RATIO: u16 = GRID_COLUMNS / LEGACY_GRID_COLUMNS;

/// Narrowest allowed placement.
pub const MIN_COL_SPAN: u16 = 1;

/// Shortest allowed placement, in row units.
pub const MIN_ROW_SPAN: u16 = 5;

/// Height of one row unit in pixel-equivalents.
pub const ROW_UNIT_PX: f64 = 10.0;

/// Row span assumed when a stored placement has none.
pub const DEFAULT_ROW_SPAN: u16 = 8;

/// Clamps a candidate column span into `[MIN_COL_SPAN, GRID_COLUMNS]`.
pub fn clamp_col_span(span: i64) -> u16 {
    span.clamp(MIN_COL_SPAN as i64, GRID_COLUMNS as i64) as u16
}

/// Clamps a candidate row span to at least `MIN_ROW_SPAN`.
pub fn clamp_row_span(span: i64) -> u16 {
    span.clamp(MIN_ROW_SPAN as i64, u16::MAX as i64) as u16
}

/// The dimension a resize acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal edge, controls `colSpan`.
    Width,
    /// Vertical edge, controls `rowSpan`.
    Height,
}

impl Axis {
    /// Returns `true` if `span` is a legal value on this axis.
    pub fn in_bounds(self, span: i64) -> bool {
        match self {
            Axis::Width => (MIN_COL_SPAN as i64..=GRID_COLUMNS as i64).contains(&span),
            Axis::Height => span >= MIN_ROW_SPAN as i64,
        }
    }

    /// Clamps `span` into this axis' bounds.
    pub fn clamp(self, span: i64) -> u16 {
        match self {
            Axis::Width => clamp_col_span(span),
            Axis::Height => clamp_row_span(span),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_ratio_is_four() {
        assert_eq!(LEGACY_SCALE_RATIO, 4);
    }

    #[test]
    fn clamp_col_span_bounds() {
        assert_eq!(clamp_col_span(-5), 1);
        assert_eq!(clamp_col_span(0), 1);
        assert_eq!(clamp_col_span(17), 17);
        assert_eq!(clamp_col_span(48), 48);
        assert_eq!(clamp_col_span(200), 48);
    }

    #[test]
    fn clamp_row_span_has_floor_only() {
        assert_eq!(clamp_row_span(0), 5);
        assert_eq!(clamp_row_span(4), 5);
        assert_eq!(clamp_row_span(5), 5);
        assert_eq!(clamp_row_span(120), 120);
    }

    #[test]
    fn axis_in_bounds() {
        assert!(!Axis::Width.in_bounds(0));
        assert!(Axis::Width.in_bounds(1));
        assert!(Axis::Width.in_bounds(48));
        assert!(!Axis::Width.in_bounds(49));
        assert!(!Axis::Height.in_bounds(4));
        assert!(Axis::Height.in_bounds(5));
        assert!(Axis::Height.in_bounds(500));
    }

    #[test]
    fn axis_display() {
        assert_eq!(Axis::Width.to_string(), "width");
        assert_eq!(Axis::Height.to_string(), "height");
    }
}
