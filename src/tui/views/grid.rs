//! Widget grid rendering.
//!
//! Each placement is drawn as a bordered card over the cells the grid view
//! maps it to. Edit mode adds the span readout on the bottom border; the
//! right and bottom borders are the resize handles.

use crate::layout::WidgetPlacement;
use crate::tui::app::App;
use crate::tui::grid_view::GridView;
use crate::widgets::WidgetDefinition;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;
use std::time::Instant;

/// Shown when the layout has nothing to draw.
pub const EMPTY_GRID_TEXT: &str = "No widgets. Press [a] to add one.";

/// How a card is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// Nothing special.
    Normal,
    /// Keyboard focus.
    Focused,
    /// Being dragged; drawn faded.
    DragSource,
    /// Current drop target.
    DropTarget,
    /// Being resized.
    Resizing,
    /// Being resized and the last candidate hit a bound.
    AtLimit,
}

impl CardState {
    fn border_style(self) -> Style {
        match self {
            CardState::Normal => Style::default().fg(Color::Gray),
            CardState::Focused => Style::default().fg(Color::Cyan),
            CardState::DragSource => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            CardState::DropTarget => Style::default().fg(Color::Green),
            CardState::Resizing => Style::default().fg(Color::Magenta),
            CardState::AtLimit => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

/// Picks the card state for `id`. Interaction states win over focus.
pub fn card_state(app: &App, id: &str, now: Instant) -> CardState {
    if let Some(session) = app.resize().session() {
        if session.widget_id == id {
            return if app.resize().limit_reached_at(now) {
                CardState::AtLimit
            } else {
                CardState::Resizing
            };
        }
    }
    let drag = app.drag();
    if drag.is_faded(id) {
        return CardState::DragSource;
    }
    if drag.is_dragging() && drag.over_id() == Some(id) {
        return CardState::DropTarget;
    }
    if app.focused() == Some(id) {
        return CardState::Focused;
    }
    CardState::Normal
}

/// Renders every visible card plus the drag preview.
pub fn render_grid(frame: &mut Frame, app: &App, view: &GridView, now: Instant) {
    let store = app.store();
    let packing = store.packing();
    let registry = store.registry();
    let editing = store.edit_mode();

    if packing.widgets.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            EMPTY_GRID_TEXT,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(hint, view.area);
        return;
    }

    for widget in &packing.widgets {
        let Some(area) = view.visible(&view.widget_cells(widget)) else {
            continue;
        };
        let Some(definition) = registry.get(&widget.placement.widget_type) else {
            continue;
        };
        let state = card_state(app, &widget.placement.id, now);
        render_card(frame, area, definition, widget.placement, state, editing);
    }

    let drag = app.drag();
    let Some(active) = drag.active_id() else {
        return;
    };
    let Some(source) = packing.find(active) else {
        return;
    };
    let source_rect = view.geometry.rect(source);
    let target_rect = drag
        .over_id()
        .and_then(|id| packing.find(id))
        .map(|w| view.geometry.rect(w));
    let Some(preview) = drag.preview(&source_rect, target_rect.as_ref(), &view.viewport_px())
    else {
        return;
    };
    let Some(area) = view.visible(&view.cells(&preview)) else {
        return;
    };
    if let Some(definition) = registry.get(&source.placement.widget_type) {
        render_preview(frame, area, definition.display_title(source.placement));
    }
}

/// Draws one widget card.
pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    definition: &WidgetDefinition,
    placement: &WidgetPlacement,
    state: CardState,
    editing: bool,
) {
    let title_style = if state == CardState::DragSource {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(if editing {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(state.border_style())
        .title(Span::styled(
            format!(" {} ", definition.display_title(placement)),
            title_style,
        ));
    if editing {
        block = block.title_bottom(
            Line::from(format!(" {}×{} ", placement.col_span, placement.row_span))
                .right_aligned(),
        );
    }

    let text_style = if state == CardState::DragSource {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let mut lines = vec![Line::from(Span::styled(
        definition.description.clone(),
        Style::default().fg(Color::DarkGray),
    ))];
    for (key, value) in definition.merged_config(placement) {
        lines.push(Line::from(vec![
            Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
            Span::styled(option_text(&value), text_style),
        ]));
    }

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, area);
}

fn render_preview(frame: &mut Frame, area: Rect, title: &str) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(block, area);
}

/// One-line rendering of an option value.
pub fn option_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(option_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
