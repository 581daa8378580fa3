//! Maps the pixel-space grid onto terminal cells.
//!
//! One terminal cell counts as [`CELL_PX`] pixel-equivalents on both axes,
//! so with the standard row unit a `rowSpan` of N is N terminal rows and
//! the 48 columns are spread over the available width. Widget rectangles
//! are rounded to whole cells edge by edge, which keeps neighbours flush.
//!
//! Rows are addressed in content coordinates (row 0 is the top of the
//! grid); the vertical scroll offset converts them to screen rows.

use ratatui::layout::Rect;

use crate::layout::{GridGeometry, GridRect, PackedWidget, Packing};

/// Pixel-equivalents per terminal cell.
pub const CELL_PX: f64 = 10.0;

/// A widget's cells in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    /// First column, relative to the grid area.
    pub x: u16,
    /// First content row.
    pub y: u32,
    /// Columns covered.
    pub width: u16,
    /// Rows covered.
    pub height: u32,
}

impl CellRect {
    /// Returns `true` if the content cell lies inside.
    pub fn contains(&self, column: u16, row: u32) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Part of a widget under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Inside the widget; pressing here starts a drag.
    Body,
    /// Right border column; pressing here resizes the width.
    RightEdge,
    /// Bottom border row; pressing here resizes the height.
    BottomEdge,
}

/// The grid area on screen plus its scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridView {
    /// Screen area the grid is drawn into.
    pub area: Rect,
    /// Content rows scrolled off the top.
    pub scroll: u32,
    /// Pixel geometry for `area`.
    pub geometry: GridGeometry,
}

impl GridView {
    /// View over `area` scrolled by `scroll` rows.
    pub fn new(area: Rect, scroll: u32) -> Self {
        Self {
            area,
            scroll,
            geometry: GridGeometry::new(area.width as f64 * CELL_PX),
        }
    }

    /// Visible viewport in pixel-equivalents (content coordinates).
    pub fn viewport_px(&self) -> GridRect {
        GridRect::new(
            0.0,
            self.scroll as f64 * CELL_PX,
            self.area.width as f64 * CELL_PX,
            self.area.height as f64 * CELL_PX,
        )
    }

    /// Rounds a pixel rectangle to cells.
    pub fn cells(&self, rect: &GridRect) -> CellRect {
        let to_cell = |px: f64| (px / CELL_PX).round().max(0.0);
        let x0 = to_cell(rect.x);
        let x1 = to_cell(rect.right()).min(self.area.width as f64);
        let y0 = to_cell(rect.y);
        let y1 = to_cell(rect.bottom());
        CellRect {
            x: x0 as u16,
            y: y0 as u32,
            width: (x1 - x0).max(0.0) as u16,
            height: (y1 - y0).max(0.0) as u32,
        }
    }

    /// Cells covered by a packed widget.
    pub fn widget_cells(&self, widget: &PackedWidget<'_>) -> CellRect {
        self.cells(&self.geometry.rect(widget))
    }

    /// Clips content cells to the screen. `None` when nothing is visible.
    pub fn visible(&self, cells: &CellRect) -> Option<Rect> {
        let top = cells.y.max(self.scroll);
        let bottom = cells
            .y
            .saturating_add(cells.height)
            .min(self.scroll.saturating_add(self.area.height as u32));
        let right = cells.x.saturating_add(cells.width).min(self.area.width);
        if bottom <= top || right <= cells.x {
            return None;
        }
        Some(Rect {
            x: self.area.x + cells.x,
            y: self.area.y + (top - self.scroll) as u16,
            width: right - cells.x,
            height: (bottom - top) as u16,
        })
    }

    /// Converts a screen position to a content cell.
    pub fn content_cell(&self, column: u16, row: u16) -> Option<(u16, u32)> {
        let inside = column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height;
        inside.then(|| {
            (
                column - self.area.x,
                (row - self.area.y) as u32 + self.scroll,
            )
        })
    }

    /// Like [`GridView::content_cell`], pinning positions outside the area
    /// to its nearest edge. Resizes and drags keep tracking the pointer
    /// after it leaves the grid.
    pub fn content_cell_clamped(&self, column: u16, row: u16) -> (u16, u32) {
        let max_column = self.area.width.saturating_sub(1);
        let max_row = self.area.height.saturating_sub(1);
        let cx = column.saturating_sub(self.area.x).min(max_column);
        let cy = row.saturating_sub(self.area.y).min(max_row);
        (cx, cy as u32 + self.scroll)
    }

    /// Centre of a content cell in pixel-equivalents.
    pub fn pointer_px(&self, cell: (u16, u32)) -> (f64, f64) {
        (
            (cell.0 as f64 + 0.5) * CELL_PX,
            (cell.1 as f64 + 0.5) * CELL_PX,
        )
    }

    /// The widget (and the part of it) at a screen position.
    pub fn hit<'p, 'a>(
        &self,
        packing: &'p Packing<'a>,
        column: u16,
        row: u16,
    ) -> Option<(&'p PackedWidget<'a>, Zone)> {
        let (cx, cy) = self.content_cell(column, row)?;
        packing.widgets.iter().find_map(|widget| {
            let cells = self.widget_cells(widget);
            if !cells.contains(cx, cy) {
                return None;
            }
            let zone = if cells.width > 1 && cx == cells.x + cells.width - 1 {
                Zone::RightEdge
            } else if cells.height > 1 && cy == cells.y + cells.height - 1 {
                Zone::BottomEdge
            } else {
                Zone::Body
            };
            Some((widget, zone))
        })
    }

    /// Largest useful scroll offset for `packing`.
    pub fn max_scroll(&self, packing: &Packing<'_>) -> u32 {
        packing
            .total_rows
            .saturating_sub(self.area.height as u32)
    }
}
