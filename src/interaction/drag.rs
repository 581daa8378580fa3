//! Drag-to-reorder.
//!
//! A pointer press only becomes a drag once the pointer has travelled the
//! activation distance, so plain clicks on a widget still work. The
//! keyboard path picks up the focused widget, walks the drop target one
//! position at a time, then drops or cancels.
//!
//! Dropping yields a [`Reorder`] for the store to apply as a list move.

use crate::layout::GridRect;

/// Default pointer travel before a press turns into a drag.
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

/// A drop that should move `active` to the index held by `over`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reorder {
    /// Dragged widget id.
    pub active: String,
    /// Widget id dropped onto.
    pub over: String,
}

/// What started the current drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// Mouse or touch.
    Pointer,
    /// Keyboard pick-up.
    Keyboard,
}

/// Drag controller state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// Nothing pressed.
    #[default]
    Idle,
    /// Pointer is down on a widget but has not moved far enough yet.
    Pressed {
        /// Pressed widget id.
        id: String,
        /// Where the press happened.
        origin: (f64, f64),
    },
    /// A drag is in progress.
    Dragging {
        /// Dragged widget id.
        active: String,
        /// Current drop target, if over one.
        over: Option<String>,
        /// Where the drag started.
        origin: (f64, f64),
        /// Latest pointer position.
        pointer: (f64, f64),
        /// Input that started the drag.
        source: DragSource,
    },
}

/// Pointer and keyboard drag-to-reorder state machine.
#[derive(Debug, Clone)]
pub struct DragReorderController {
    activation_distance: f64,
    state: DragState,
}

impl DragReorderController {
    /// Creates an idle controller.
    pub fn new(activation_distance: f64) -> Self {
        Self {
            activation_distance,
            state: DragState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The dragged widget id.
    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { active, .. } => Some(active),
            _ => None,
        }
    }

    /// The current drop target id.
    pub fn over_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if `id` is the drag source (drawn faded).
    pub fn is_faded(&self, id: &str) -> bool {
        self.active_id() == Some(id)
    }

    /// Pointer pressed on widget `id`. Ignored outside edit mode.
    pub fn press(&mut self, edit_mode: bool, id: &str, at: (f64, f64)) {
        if !edit_mode || self.is_dragging() {
            return;
        }
        self.state = DragState::Pressed {
            id: id.to_string(),
            origin: at,
        };
    }

    /// Pointer moved to `at`, hovering `over`.
    ///
    /// Returns `true` if this move started the drag.
    pub fn pointer_move(&mut self, at: (f64, f64), over: Option<&str>) -> bool {
        match &mut self.state {
            DragState::Pressed { id, origin } => {
                let (dx, dy) = (at.0 - origin.0, at.1 - origin.1);
                if dx.hypot(dy) < self.activation_distance {
                    return false;
                }
                tracing::debug!(id = %id, "drag started");
                let started = DragState::Dragging {
                    active: std::mem::take(id),
                    over: over.map(str::to_string),
                    origin: *origin,
                    pointer: at,
                    source: DragSource::Pointer,
                };
                self.state = started;
                true
            }
            DragState::Dragging {
                over: current,
                pointer,
                source: DragSource::Pointer,
                ..
            } => {
                *pointer = at;
                *current = over.map(str::to_string);
                false
            }
            _ => false,
        }
    }

    /// Pointer released. Returns the reorder to apply, if any.
    pub fn release(&mut self) -> Option<Reorder> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                source: DragSource::Pointer,
                active,
                over,
                ..
            } => Self::finish(active, over),
            keyboard @ DragState::Dragging { .. } => {
                self.state = keyboard;
                None
            }
            DragState::Pressed { .. } | DragState::Idle => None,
        }
    }

    /// Keyboard pick-up of the focused widget.
    pub fn pick_up(&mut self, edit_mode: bool, id: &str) -> bool {
        if !edit_mode || self.is_dragging() {
            return false;
        }
        tracing::debug!(id, "picked up");
        self.state = DragState::Dragging {
            active: id.to_string(),
            over: Some(id.to_string()),
            origin: (0.0, 0.0),
            pointer: (0.0, 0.0),
            source: DragSource::Keyboard,
        };
        true
    }

    /// Moves the keyboard drop target `delta` positions through `order`.
    ///
    /// The target stops at either end of the list.
    pub fn step(&mut self, order: &[&str], delta: isize) {
        let DragState::Dragging {
            active,
            over,
            source: DragSource::Keyboard,
            ..
        } = &mut self.state
        else {
            return;
        };
        if order.is_empty() {
            return;
        }
        let anchor = over.as_deref().unwrap_or(active.as_str());
        let current = order.iter().position(|id| *id == anchor).unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, order.len() as isize - 1) as usize;
        *over = Some(order[next].to_string());
    }

    /// Keyboard drop. Returns the reorder to apply, if any.
    pub fn drop_target(&mut self) -> Option<Reorder> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging {
                source: DragSource::Keyboard,
                active,
                over,
                ..
            } => Self::finish(active, over),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Abandons any press or drag without reordering.
    pub fn cancel(&mut self) {
        if !matches!(self.state, DragState::Idle) {
            tracing::debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Floating preview rectangle for the dragged widget.
    ///
    /// Pointer drags offset `source` by the pointer travel; keyboard drags
    /// sit on `target`. The result is kept inside `viewport`.
    pub fn preview(
        &self,
        source: &GridRect,
        target: Option<&GridRect>,
        viewport: &GridRect,
    ) -> Option<GridRect> {
        let DragState::Dragging {
            origin,
            pointer,
            source: kind,
            ..
        } = &self.state
        else {
            return None;
        };
        let rect = match (kind, target) {
            (DragSource::Pointer, _) => GridRect::new(
                source.x + pointer.0 - origin.0,
                source.y + pointer.1 - origin.1,
                source.width,
                source.height,
            ),
            (DragSource::Keyboard, Some(target)) => {
                GridRect::new(target.x, target.y, source.width, source.height)
            }
            (DragSource::Keyboard, None) => *source,
        };
        Some(rect.clamp_within(viewport))
    }

    fn finish(active: String, over: Option<String>) -> Option<Reorder> {
        match over {
            Some(over) if over != active => Some(Reorder { active, over }),
            _ => None,
        }
    }
}

impl Default for DragReorderController {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}
