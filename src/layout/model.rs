//! The ordered widget layout and its mutations.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::grid::{Axis, GRID_COLUMNS};
use crate::layout::{LayoutError, WidgetPlacement};

/// Ordered sequence of widget placements.
///
/// Order is visual placement order; there are no explicit coordinates.
/// Ids are unique for the lifetime of the layout, and no mutation here
/// ever changes a placement's `id` or `widget_type`.
///
/// Serialises as the bare placement array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    placements: Vec<WidgetPlacement>,
}

impl Layout {
    /// The layout every user starts with.
    pub fn builtin_default() -> Self {
        Self {
            placements: vec![
                WidgetPlacement::new("stats-1", "stats", 48, 6),
                WidgetPlacement::new("quarterly-1", "quarterly-stats", 24, 12),
                WidgetPlacement::new("revenue-chart-1", "revenue-chart", 24, 16),
                WidgetPlacement::new("upcoming-1", "upcoming", 24, 20),
                WidgetPlacement::new("occupancy-1", "occupancy-chart", 12, 14),
                WidgetPlacement::new("calendar-1", "calendar", 12, 16),
            ],
        }
    }

    /// Builds a layout from placements, clamping spans.
    ///
    /// Returns `LayoutError::DuplicateId` if two placements share an id.
    pub fn from_placements(placements: Vec<WidgetPlacement>) -> Result<Self, LayoutError> {
        let mut seen = HashSet::new();
        for p in &placements {
            if !seen.insert(p.id.as_str()) {
                return Err(LayoutError::DuplicateId { id: p.id.clone() });
            }
        }
        let mut layout = Self { placements };
        for p in &mut layout.placements {
            p.normalize();
        }
        Ok(layout)
    }

    /// All placements in order.
    pub fn placements(&self) -> &[WidgetPlacement] {
        &self.placements
    }

    /// Consumes the layout, returning its placements.
    pub fn into_placements(self) -> Vec<WidgetPlacement> {
        self.placements
    }

    /// Iterates placements in order.
    pub fn iter(&self) -> impl Iterator<Item = &WidgetPlacement> {
        self.placements.iter()
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns `true` if the layout has no placements.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.id.as_str()).collect()
    }

    /// Looks up a placement by id.
    pub fn get(&self, id: &str) -> Option<&WidgetPlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Position of the placement with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.placements.iter().position(|p| p.id == id)
    }

    /// Returns `true` if any placement has the given type.
    pub fn contains_type(&self, widget_type: &str) -> bool {
        self.placements.iter().any(|p| p.widget_type == widget_type)
    }

    /// Appends a placement.
    pub fn push(&mut self, mut placement: WidgetPlacement) -> Result<(), LayoutError> {
        if self.get(&placement.id).is_some() {
            return Err(LayoutError::DuplicateId { id: placement.id });
        }
        placement.normalize();
        self.placements.push(placement);
        Ok(())
    }

    /// Generates an id of the form `<type>-<stamp>` not used in the layout.
    ///
    /// `stamp` is normally the current time in milliseconds; on collision a
    /// numeric suffix is appended.
    pub fn fresh_id(&self, widget_type: &str, stamp: i64) -> String {
        let base = format!("{widget_type}-{stamp}");
        if self.get(&base).is_none() {
            return base;
        }
        (2..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or(base)
    }

    /// Removes the placement with `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<WidgetPlacement> {
        let index = self.index_of(id)?;
        Some(self.placements.remove(index))
    }

    /// Moves the `active` placement to the index currently held by `over`.
    ///
    /// This is a list move: the active entry is removed and reinserted, and
    /// every other entry keeps its relative order. Returns the `(from, to)`
    /// indices, or `None` when the ids are equal or either is missing.
    pub fn move_onto(&mut self, active: &str, over: &str) -> Option<(usize, usize)> {
        if active == over {
            return None;
        }
        let from = self.index_of(active)?;
        let to = self.index_of(over)?;
        self.move_index(from, to);
        Some((from, to))
    }

    /// Removes the entry at `from` and reinserts it at `to`.
    ///
    /// Out-of-range indices leave the layout unchanged.
    pub fn move_index(&mut self, from: usize, to: usize) -> bool {
        let len = self.placements.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let item = self.placements.remove(from);
        self.placements.insert(to, item);
        true
    }

    /// Sets the span of `id` along `axis`.
    ///
    /// The value is clamped to `[min_span, 48]` for width and to at least
    /// `min_span` for height. Returns the stored value.
    pub fn set_span(
        &mut self,
        id: &str,
        axis: Axis,
        span: i64,
        min_span: u16,
    ) -> Result<u16, LayoutError> {
        let placement = self
            .placements
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LayoutError::UnknownId { id: id.to_string() })?;
        let floor = min_span.min(match axis {
            Axis::Width => GRID_COLUMNS,
            Axis::Height => u16::MAX,
        }) as i64;
        Ok(placement.set_span(axis, span.max(floor)))
    }

    /// Merges `options` into the placement's `config`.
    pub fn configure(&mut self, id: &str, options: Map<String, Value>) -> Result<(), LayoutError> {
        let placement = self
            .placements
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LayoutError::UnknownId { id: id.to_string() })?;
        let config = placement.config.get_or_insert_with(Map::new);
        for (key, value) in options {
            config.insert(key, value);
        }
        Ok(())
    }
}
