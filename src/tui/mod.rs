//! TUI module for the dashboard grid.
//!
//! Provides a terminal user interface built on ratatui and crossterm that
//! renders the layout as bordered widget cards and supports edit mode
//! with mouse and keyboard drag-to-reorder and resizing.

pub mod app;
pub mod event;
pub mod grid_view;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
