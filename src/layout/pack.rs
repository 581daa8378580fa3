//! Grid packing and geometry.
//!
//! Placements flow into a 48-column grid in layout order: left to right,
//! wrapping to a new row whenever the next placement does not fit in the
//! columns left on the current row. A row is as tall as its tallest
//! placement. This is the same row-filling auto-flow a browser grid applies
//! to span-only items, so nothing here tracks explicit coordinates.

use crate::grid::{GRID_COLUMNS, ROW_UNIT_PX};
use crate::layout::{Layout, WidgetPlacement};
use crate::widgets::WidgetRegistry;

/// An axis-aligned rectangle in pixel-equivalents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl GridRect {
    /// Creates a rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if the point lies inside (right/bottom exclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Moves the rectangle so it lies inside `bounds` where possible.
    ///
    /// A rectangle larger than `bounds` is pinned to its top-left corner.
    pub fn clamp_within(&self, bounds: &GridRect) -> GridRect {
        let max_x = (bounds.right() - self.width).max(bounds.x);
        let max_y = (bounds.bottom() - self.height).max(bounds.y);
        GridRect {
            x: self.x.clamp(bounds.x, max_x),
            y: self.y.clamp(bounds.y, max_y),
            width: self.width,
            height: self.height,
        }
    }
}

/// A placement with its resolved grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedWidget<'a> {
    /// The placement being positioned.
    pub placement: &'a WidgetPlacement,
    /// Index of the placement in the layout.
    pub index: usize,
    /// First column occupied (0-based).
    pub column: u16,
    /// First row unit occupied (0-based).
    pub row: u32,
}

/// Result of packing a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Packing<'a> {
    /// Renderable placements in layout order.
    pub widgets: Vec<PackedWidget<'a>>,
    /// Total height in row units.
    pub total_rows: u32,
}

impl<'a> Packing<'a> {
    /// Finds the packed entry for `id`.
    pub fn find(&self, id: &str) -> Option<&PackedWidget<'a>> {
        self.widgets.iter().find(|w| w.placement.id == id)
    }

    /// Finds the packed entry whose rectangle contains the point.
    pub fn hit_test(&self, geometry: &GridGeometry, x: f64, y: f64) -> Option<&PackedWidget<'a>> {
        self.widgets
            .iter()
            .find(|w| geometry.rect(w).contains(x, y))
    }
}

/// Packs `layout` into grid cells.
///
/// Placements whose type is missing from `registry` are skipped; they stay
/// in the layout but take no space.
pub fn pack<'a>(layout: &'a Layout, registry: &WidgetRegistry) -> Packing<'a> {
    let mut widgets = Vec::with_capacity(layout.len());
    let mut column: u16 = 0;
    let mut row_start: u32 = 0;
    let mut row_height: u32 = 0;

    for (index, placement) in layout.iter().enumerate() {
        if !registry.contains(&placement.widget_type) {
            tracing::debug!(
                id = %placement.id,
                widget_type = %placement.widget_type,
                "skipping placement with unknown widget type"
            );
            continue;
        }
        let span = placement.col_span.min(GRID_COLUMNS);
        if column + span > GRID_COLUMNS {
            row_start += row_height;
            column = 0;
            row_height = 0;
        }
        widgets.push(PackedWidget {
            placement,
            index,
            column,
            row: row_start,
        });
        column += span;
        row_height = row_height.max(placement.row_span as u32);
    }

    Packing {
        widgets,
        total_rows: row_start + row_height,
    }
}

/// Maps grid cells onto a container of a given width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Left edge of the container.
    pub origin_x: f64,
    /// Top edge of the container.
    pub origin_y: f64,
    /// Container width.
    pub width: f64,
    /// Height of one row unit.
    pub row_unit: f64,
}

impl GridGeometry {
    /// Geometry for a container at the origin with the standard row unit.
    pub fn new(width: f64) -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            width,
            row_unit: ROW_UNIT_PX,
        }
    }

    /// Width of one grid column.
    pub fn column_width(&self) -> f64 {
        self.width / GRID_COLUMNS as f64
    }

    /// Rectangle covered by a packed placement.
    pub fn rect(&self, widget: &PackedWidget<'_>) -> GridRect {
        let col_width = self.column_width();
        GridRect {
            x: self.origin_x + widget.column as f64 * col_width,
            y: self.origin_y + widget.row as f64 * self.row_unit,
            width: widget.placement.col_span as f64 * col_width,
            height: widget.placement.row_span as f64 * self.row_unit,
        }
    }

    /// Total content height of a packing.
    pub fn content_height(&self, packing: &Packing<'_>) -> f64 {
        packing.total_rows as f64 * self.row_unit
    }
}
