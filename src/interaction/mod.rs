//! Edit-mode interactions: drag-to-reorder and freehand resize.
//!
//! Both controllers are plain state machines fed with coordinates, so they
//! run the same under a mouse, a keyboard or a test. Neither mutates the
//! layout; they return what should change and the store applies it.

mod drag;
mod pulse;
mod resize;

pub use drag::{DragReorderController, DragSource, DragState, Reorder, DEFAULT_ACTIVATION_DISTANCE};
pub use pulse::{LimitPulse, DEFAULT_PULSE};
pub use resize::{ResizeController, ResizeError, ResizeOutcome, ResizeSession, ResizeState};
