//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant used to expire the limit
//! pulse and status messages.

use crate::grid::Axis;
use crate::tui::app::App;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                            return Ok(Event::Key(key));
                        }
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Key releases, focus and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Switch edit mode on or off.
    ToggleEditMode,
    /// Move focus to the next widget.
    FocusNext,
    /// Move focus to the previous widget.
    FocusPrevious,
    /// Pick up the focused widget, or drop the one being carried.
    PickUpOrDrop,
    /// Move the carried widget's drop target by the given offset.
    StepTarget(isize),
    /// Cancel the current drag, or close the add panel.
    Cancel,
    /// Grow or shrink the focused widget by one unit.
    Nudge {
        /// Edge being moved.
        axis: Axis,
        /// Units to add (negative shrinks).
        delta: i64,
    },
    /// Open the add-widget panel.
    OpenAddPanel,
    /// Move the add panel selection.
    AddPanelStep(isize),
    /// Add the widget type highlighted in the add panel.
    AddSelected,
    /// Remove the focused widget.
    RemoveFocused,
    /// Apply the preset with the given 1-based index.
    ApplyPreset(u8),
    /// Restore the default layout.
    Reset,
    /// Scroll the grid by the given number of rows.
    Scroll(i32),
}

/// Returns `true` for the keys that quit from anywhere.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Maps a key to an action given the app's current mode.
///
/// The add panel, when open, captures navigation keys. A widget carried
/// with the keyboard turns the arrow keys into drop-target moves.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if should_quit(key) {
        return Action::Quit;
    }

    if app.add_panel_open() {
        return match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::AddPanelStep(1),
            KeyCode::Char('k') | KeyCode::Up => Action::AddPanelStep(-1),
            KeyCode::Enter | KeyCode::Char(' ') => Action::AddSelected,
            KeyCode::Esc | KeyCode::Char('a') => Action::Cancel,
            _ => Action::None,
        };
    }

    if app.carrying() {
        return match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Right | KeyCode::Tab => {
                Action::StepTarget(1)
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Left | KeyCode::BackTab => {
                Action::StepTarget(-1)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Action::PickUpOrDrop,
            KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        };
    }

    let editing = app.store().edit_mode();
    match key.code {
        KeyCode::Char('e') => Action::ToggleEditMode,
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Action::FocusNext,
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Action::FocusPrevious,
        KeyCode::PageDown => Action::Scroll(10),
        KeyCode::PageUp => Action::Scroll(-10),
        KeyCode::Char('a') => Action::OpenAddPanel,
        KeyCode::Char(c @ '1'..='9') => Action::ApplyPreset(c as u8 - b'0'),
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Esc if editing => Action::ToggleEditMode,
        KeyCode::Enter | KeyCode::Char(' ') if editing => Action::PickUpOrDrop,
        KeyCode::Char('d') | KeyCode::Delete if editing => Action::RemoveFocused,
        KeyCode::Char('h') | KeyCode::Char('<') if editing => Action::Nudge {
            axis: Axis::Width,
            delta: -1,
        },
        KeyCode::Char('l') | KeyCode::Char('>') if editing => Action::Nudge {
            axis: Axis::Width,
            delta: 1,
        },
        KeyCode::Char('-') | KeyCode::Char('_') if editing => Action::Nudge {
            axis: Axis::Height,
            delta: -1,
        },
        KeyCode::Char('+') | KeyCode::Char('=') if editing => Action::Nudge {
            axis: Axis::Height,
            delta: 1,
        },
        _ => Action::None,
    }
}
