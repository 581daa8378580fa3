//! Main rendering orchestration for the TUI dashboard.
//!
//! Provides the top-level `render_dashboard` function that composes the
//! header, the widget grid, the footer and the add-widget overlay.

use crate::tui::app::App;
use crate::tui::grid_view::GridView;
use crate::tui::views::add_panel::render_add_panel;
use crate::tui::views::grid::render_grid;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "Dashboard Grid";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Footer keybindings outside edit mode.
pub const FOOTER_VIEW: &str = "[e] Edit  [a] Add  [1-3] Preset  [r] Reset  [j/k] Focus  [q] Quit";

/// Footer keybindings in edit mode.
pub const FOOTER_EDIT: &str =
    "[Space] Pick up  [h/l] Width  [-/+] Height  [d] Remove  [a] Add  [Esc] Done  [q] Quit";

/// Footer keybindings while carrying a widget.
pub const FOOTER_CARRY: &str = "[j/k] Move  [Space] Drop  [Esc] Cancel";

/// Footer keybindings while the add panel is open.
pub const FOOTER_ADD_PANEL: &str = "[j/k] Select  [Enter] Add  [Esc] Close";

/// Shown while the limit pulse is active.
pub const LIMIT_TEXT: &str = "Limit reached";

/// Renders the full dashboard: header, grid, footer and any overlay.
///
/// Updates `app.grid_area` for mouse hit-testing and clamps `app.scroll`
/// to the content height.
pub fn render_dashboard(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let now = Instant::now();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // grid
            Constraint::Length(1), // footer
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_line(app, chunks[0].width)), chunks[0]);

    app.grid_area = Some(chunks[1]);
    let max_scroll = GridView::new(chunks[1], 0).max_scroll(&app.store().packing());
    app.scroll = app.scroll.min(max_scroll);
    let view = GridView::new(chunks[1], app.scroll);
    render_grid(frame, app, &view, now);

    frame.render_widget(Paragraph::new(footer_line(app, now)), chunks[2]);

    if app.add_panel_open() {
        render_add_panel(frame, app, area);
    }
}

/// Title, edit badge and user scope on the left; version on the right.
fn header_line(app: &App, width: u16) -> Line<'static> {
    let mut spans = vec![Span::styled(HEADER_TEXT, Style::default().fg(Color::Cyan))];
    let mut used = HEADER_TEXT.len();
    if app.store().edit_mode() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " EDIT ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        used += 7;
    }
    let scope = format!("  user: {}", app.store().scope());
    used += scope.chars().count();
    spans.push(Span::styled(scope, Style::default().fg(Color::DarkGray)));

    let padding = (width as usize)
        .saturating_sub(used)
        .saturating_sub(VERSION_TEXT.len());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(VERSION_TEXT, Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

/// Limit pulse first, then the status message, then mode keybindings.
fn footer_line(app: &App, now: Instant) -> Line<'static> {
    let mut spans = Vec::new();
    if app.resize().limit_reached_at(now) {
        spans.push(Span::styled(
            LIMIT_TEXT,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("  "));
    }
    match &app.status_message {
        Some((msg, expiry)) if now < *expiry => {
            spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
        }
        _ => {
            let hints = if app.add_panel_open() {
                FOOTER_ADD_PANEL
            } else if app.carrying() {
                FOOTER_CARRY
            } else if app.store().edit_mode() {
                FOOTER_EDIT
            } else {
                FOOTER_VIEW
            };
            spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));
        }
    }
    Line::from(spans)
}
