//! View components rendered by the dashboard.

pub mod add_panel;
pub mod grid;
