//! Add-widget overlay.
//!
//! Lists every registry entry with its description; types already on the
//! dashboard carry an "added" marker but can still be added again.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Marker appended to types already present in the layout.
pub const ADDED_MARKER: &str = "[added]";

/// Renders the panel centred in `area`.
pub fn render_add_panel(frame: &mut Frame, app: &App, area: Rect) {
    let entries = app.store().add_panel();
    let panel = centered(area, 64, entries.len() as u16 + 2);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::styled(
                    entry.definition.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    entry.definition.description.clone(),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if entry.already_added {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(ADDED_MARKER, Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Add widget "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(app.add_panel_selection());
    frame.render_widget(Clear, panel);
    frame.render_stateful_widget(list, panel, &mut state);
}

/// A `width` × `height` rectangle centred in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::event::Action;
    use crate::tui::test_utils::{find_row_with_text, render_dashboard_to_buffer, row_text, test_app};
    use std::time::Instant;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered(area, 64, 12);
        assert_eq!(rect, Rect::new(0, 0, 40, 10));
        let rect = centered(Rect::new(0, 0, 100, 40), 64, 12);
        assert_eq!(rect, Rect::new(18, 14, 64, 12));
    }

    #[test]
    fn test_panel_lists_types_with_added_markers() {
        let mut app = test_app();
        app.perform(Action::OpenAddPanel, Instant::now());
        let buffer = render_dashboard_to_buffer(&mut app, 100, 40);

        let calendar = find_row_with_text(&buffer, "Monthly or weekly").expect("calendar row");
        assert!(row_text(&buffer, calendar).contains(ADDED_MARKER));

        let notes = find_row_with_text(&buffer, "Simple notepad").expect("notes row");
        assert!(!row_text(&buffer, notes).contains(ADDED_MARKER));
    }

    #[test]
    fn test_notes_marked_after_adding() {
        let mut app = test_app();
        let now = Instant::now();
        app.perform(Action::OpenAddPanel, now);
        let notes_index = app
            .store()
            .registry()
            .available_types()
            .iter()
            .position(|t| *t == "notes")
            .expect("notes registered");
        app.perform(Action::AddPanelStep(notes_index as isize), now);
        app.perform(Action::AddSelected, now);
        assert!(!app.add_panel_open(), "adding closes the panel");

        app.perform(Action::OpenAddPanel, now);
        let buffer = render_dashboard_to_buffer(&mut app, 100, 40);
        let notes = find_row_with_text(&buffer, "Simple notepad").expect("notes row");
        assert!(row_text(&buffer, notes).contains(ADDED_MARKER));
    }
}
