//! Dashboard Grid library
//!
//! This crate provides the widget grid engine behind a configurable
//! dashboard: a 48-column grid of panel widgets that users reorder, resize,
//! add and remove, with per-user persistence and a one-time upgrade of
//! layouts saved under the older 12-column scale.
//!
//! The [`store::LayoutStore`] owns the layout. Everything else is either a
//! pure function over it ([`layout::pack`], [`layout::migrate`]) or an
//! interaction state machine that produces changes for the store to commit
//! ([`interaction`]).

/// Grid constants and span bounds.
pub mod grid;

/// Widget type registry.
pub mod widgets;

/// Layout model, migration, packing and presets.
pub mod layout;

/// Drag-reorder and resize state machines.
pub mod interaction;

/// Per-user layout storage.
pub mod persist;

/// The owning layout store.
pub mod store;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Tracing subscriber setup.
pub mod logging;

/// TUI module providing the terminal dashboard.
pub mod tui;
