//! Freehand widget resizing.
//!
//! The controller is a small state machine:
//!
//! ```text
//! Idle --begin--> Resizing { widget, axis, start pointer, start span, unit }
//!   ^                 |  pointer_move: commit / reject / ignore
//!   +------end--------+
//! ```
//!
//! Pointer positions are converted to whole grid units relative to where
//! the drag started. Candidates inside the axis bounds are committed live;
//! candidates outside are dropped and raise the [`LimitPulse`]. Releasing
//! the pointer changes nothing: the last committed span is the result.

use std::time::Instant;
use thiserror::Error;

use crate::grid::{Axis, ROW_UNIT_PX};
use crate::interaction::LimitPulse;
use crate::layout::{GridRect, WidgetPlacement};

/// Reasons a resize cannot start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResizeError {
    /// Resizing is only available in edit mode.
    #[error("Resizing requires edit mode")]
    NotEditing,

    /// Another resize is in progress.
    #[error("Already resizing widget '{widget_id}'")]
    AlreadyActive {
        /// Widget currently being resized.
        widget_id: String,
    },

    /// The target has no rendered extent to measure units from.
    #[error("Widget '{widget_id}' has no rendered size")]
    ZeroSized {
        /// Widget that could not be measured.
        widget_id: String,
    },
}

/// An in-progress resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    /// Widget being resized.
    pub widget_id: String,
    /// Edge being dragged.
    pub axis: Axis,
    /// Pointer coordinate along `axis` when the drag began.
    pub start_pointer: f64,
    /// Span along `axis` when the drag began.
    pub start_span: u16,
    /// Size of one grid unit along `axis`.
    pub unit_px: f64,
}

impl ResizeSession {
    /// Span the pointer position maps to, before bounds checks.
    pub fn candidate(&self, pointer: f64) -> i64 {
        let delta = ((pointer - self.start_pointer) / self.unit_px).round() as i64;
        self.start_span as i64 + delta
    }
}

/// Resize controller state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResizeState {
    /// No resize in progress.
    #[default]
    Idle,
    /// A resize is in progress.
    Resizing(ResizeSession),
}

/// What a pointer move (or keyboard nudge) produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// No resize in progress.
    Ignored,
    /// The candidate equals the current span.
    Unchanged,
    /// A new span should be written to the layout.
    Committed {
        /// Widget to update.
        widget_id: String,
        /// Axis to update.
        axis: Axis,
        /// New span.
        span: u16,
    },
    /// The candidate fell outside the axis bounds and was dropped.
    Rejected {
        /// The out-of-bounds span.
        candidate: i64,
    },
}

/// Pointer-driven resize state machine with a limit pulse.
#[derive(Debug, Clone)]
pub struct ResizeController {
    state: ResizeState,
    row_unit_px: f64,
    pulse: LimitPulse,
}

impl ResizeController {
    /// Creates an idle controller.
    pub fn new(row_unit_px: f64, pulse: LimitPulse) -> Self {
        Self {
            state: ResizeState::Idle,
            row_unit_px,
            pulse,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&ResizeSession> {
        match &self.state {
            ResizeState::Resizing(session) => Some(session),
            ResizeState::Idle => None,
        }
    }

    /// Returns `true` while a resize is in progress.
    pub fn is_active(&self) -> bool {
        self.session().is_some()
    }

    /// Returns `true` while the limit pulse is showing.
    pub fn limit_reached_at(&self, now: Instant) -> bool {
        self.pulse.is_active_at(now)
    }

    /// Clears an expired pulse. Returns `true` if it just went out.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.pulse.expire_at(now)
    }

    /// Starts resizing `placement` along `axis`.
    ///
    /// `rendered` is the placement's on-screen rectangle; a column is
    /// `rendered.width / colSpan` wide, a row is the fixed row unit.
    pub fn begin(
        &mut self,
        edit_mode: bool,
        placement: &WidgetPlacement,
        axis: Axis,
        pointer: f64,
        rendered: &GridRect,
    ) -> Result<(), ResizeError> {
        if !edit_mode {
            return Err(ResizeError::NotEditing);
        }
        if let Some(session) = self.session() {
            return Err(ResizeError::AlreadyActive {
                widget_id: session.widget_id.clone(),
            });
        }
        let start_span = placement.span(axis);
        let unit_px = match axis {
            Axis::Width => rendered.width / start_span as f64,
            Axis::Height => self.row_unit_px,
        };
        if !unit_px.is_finite() || unit_px <= 0.0 {
            return Err(ResizeError::ZeroSized {
                widget_id: placement.id.clone(),
            });
        }
        tracing::debug!(id = %placement.id, %axis, start_span, unit_px, "resize started");
        self.state = ResizeState::Resizing(ResizeSession {
            widget_id: placement.id.clone(),
            axis,
            start_pointer: pointer,
            start_span,
            unit_px,
        });
        Ok(())
    }

    /// Feeds a pointer position along the session's axis.
    ///
    /// `current_span` is the span the layout holds right now.
    pub fn pointer_move(&mut self, pointer: f64, current_span: u16, now: Instant) -> ResizeOutcome {
        let Some(session) = self.session() else {
            return ResizeOutcome::Ignored;
        };
        let candidate = session.candidate(pointer);
        let widget_id = session.widget_id.clone();
        let axis = session.axis;
        self.judge(widget_id, axis, candidate, current_span, now)
    }

    /// Grows or shrinks `placement` by `delta` units without a pointer.
    ///
    /// Goes through the same bounds check and pulse as pointer moves.
    pub fn nudge(
        &mut self,
        edit_mode: bool,
        placement: &WidgetPlacement,
        axis: Axis,
        delta: i64,
        now: Instant,
    ) -> Result<ResizeOutcome, ResizeError> {
        if !edit_mode {
            return Err(ResizeError::NotEditing);
        }
        if let Some(session) = self.session() {
            return Err(ResizeError::AlreadyActive {
                widget_id: session.widget_id.clone(),
            });
        }
        let current = placement.span(axis);
        Ok(self.judge(
            placement.id.clone(),
            axis,
            current as i64 + delta,
            current,
            now,
        ))
    }

    /// Ends the resize. The layout keeps its last committed span.
    pub fn end(&mut self) -> Option<ResizeSession> {
        match std::mem::take(&mut self.state) {
            ResizeState::Resizing(session) => {
                tracing::debug!(id = %session.widget_id, "resize ended");
                Some(session)
            }
            ResizeState::Idle => None,
        }
    }

    fn judge(
        &mut self,
        widget_id: String,
        axis: Axis,
        candidate: i64,
        current_span: u16,
        now: Instant,
    ) -> ResizeOutcome {
        if !axis.in_bounds(candidate) {
            if self.pulse.trigger_at(now) {
                tracing::debug!(id = %widget_id, %axis, candidate, "resize limit reached");
            }
            return ResizeOutcome::Rejected { candidate };
        }
        if candidate == current_span as i64 {
            return ResizeOutcome::Unchanged;
        }
        ResizeOutcome::Committed {
            widget_id,
            axis,
            span: candidate as u16,
        }
    }
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(ROW_UNIT_PX, LimitPulse::default())
    }
}
