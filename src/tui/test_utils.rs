//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helper functions for creating test terminals, extracting buffer
//! content, and building an app over an in-memory layout store.

#![cfg(test)]

use crate::persist::{LayoutPersistence, MemoryBackend, UserScope};
use crate::store::LayoutStore;
use crate::tui::app::App;
use crate::widgets::WidgetRegistry;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    (0..area.height).find(|row| row_text(buffer, *row).contains(text))
}

/// An app over the default layout, stored in memory under scope `test`.
pub fn test_app() -> App {
    test_app_with_backend().1
}

/// Like [`test_app`], also returning the backend handle.
pub fn test_app_with_backend() -> (MemoryBackend, App) {
    let handle = MemoryBackend::new();
    let persistence = LayoutPersistence::new(Box::new(handle.clone()), UserScope::new("test"));
    let store = LayoutStore::open(WidgetRegistry::builtin(), persistence);
    (handle, App::new(store))
}

/// Renders the full dashboard to a buffer and returns the buffer for inspection.
pub fn render_dashboard_to_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| {
            crate::tui::ui::render_dashboard(frame, app);
        })
        .expect("draw failed");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_terminal_creates_terminal() {
        let terminal = test_terminal(80, 24);
        let size = terminal.size().expect("should have size");
        assert_eq!(size.width, 80);
        assert_eq!(size.height, 24);
    }

    #[test]
    fn test_row_text_out_of_range_is_empty() {
        let terminal = test_terminal(10, 2);
        assert_eq!(row_text(terminal.backend().buffer(), 5), "");
    }

    #[test]
    fn test_find_row_with_text_returns_row_index() {
        let mut terminal = test_terminal(40, 10);
        terminal
            .draw(|frame| {
                let area = frame.area();
                use ratatui::layout::{Constraint, Direction, Layout};
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Length(1)])
                    .split(area);
                frame.render_widget(ratatui::widgets::Paragraph::new("First Line"), chunks[0]);
                frame.render_widget(ratatui::widgets::Paragraph::new("Target Row"), chunks[1]);
            })
            .expect("draw failed");
        let buffer = terminal.backend().buffer();
        assert_eq!(find_row_with_text(buffer, "Target Row"), Some(1));
        assert_eq!(find_row_with_text(buffer, "Missing"), None);
    }

    #[test]
    fn test_test_app_starts_on_default_layout() {
        let app = test_app();
        assert_eq!(app.store().layout().len(), 6);
        assert_eq!(app.focused(), Some("stats-1"));
        assert!(!app.store().edit_mode());
    }
}
