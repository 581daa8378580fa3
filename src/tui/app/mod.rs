//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! All layout changes go through the [`LayoutStore`]; the app only keeps
//! view state (focus, scroll, the add panel) and the two interaction
//! controllers.

mod update;

use crate::interaction::{DragReorderController, DragSource, DragState, ResizeController};
use crate::layout::WidgetPlacement;
use crate::store::{LayoutEvent, LayoutStore};
use crate::tui::event::{handle_key_event, Event, EventHandler};
use crate::tui::grid_view::GridView;
use crate::tui::ui::render_dashboard;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::Rect;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// How long a status message stays in the footer.
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(2);

/// Default redraw tick.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(100);

/// Core application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed.
    pub tick_count: u64,
    /// Content rows scrolled off the top of the grid.
    pub scroll: u32,
    /// Temporary status message shown in footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    /// Screen area of the grid, updated during each render pass.
    ///
    /// Mouse hit-testing maps positions through it. `None` until the first
    /// render.
    pub grid_area: Option<Rect>,
    store: LayoutStore,
    updates: broadcast::Receiver<LayoutEvent>,
    drag: DragReorderController,
    resize: ResizeController,
    focused: Option<String>,
    add_panel: Option<usize>,
    tick_rate: Duration,
}

impl App {
    /// Creates an app over `store` with default interaction settings.
    pub fn new(store: LayoutStore) -> Self {
        let updates = store.subscribe();
        let focused = store.layout().ids().first().map(|id| id.to_string());
        Self {
            should_quit: false,
            tick_count: 0,
            scroll: 0,
            status_message: None,
            grid_area: None,
            store,
            updates,
            drag: DragReorderController::default(),
            resize: ResizeController::default(),
            focused,
            add_panel: None,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }

    /// Replaces the drag and resize controllers.
    pub fn with_controllers(mut self, drag: DragReorderController, resize: ResizeController) -> Self {
        self.drag = drag;
        self.resize = resize;
        self
    }

    /// Sets the redraw tick.
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// The layout store.
    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut LayoutStore {
        &mut self.store
    }

    /// The drag controller.
    pub fn drag(&self) -> &DragReorderController {
        &self.drag
    }

    /// The resize controller.
    pub fn resize(&self) -> &ResizeController {
        &self.resize
    }

    /// Id of the focused widget.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Placement of the focused widget.
    pub fn focused_placement(&self) -> Option<&WidgetPlacement> {
        self.focused.as_deref().and_then(|id| self.store.get(id))
    }

    /// Returns `true` while the add-widget panel is showing.
    pub fn add_panel_open(&self) -> bool {
        self.add_panel.is_some()
    }

    /// Highlighted row of the add-widget panel.
    pub fn add_panel_selection(&self) -> Option<usize> {
        self.add_panel
    }

    /// Returns `true` while a widget is carried with the keyboard.
    pub fn carrying(&self) -> bool {
        matches!(
            self.drag.state(),
            DragState::Dragging {
                source: DragSource::Keyboard,
                ..
            }
        )
    }

    /// The grid view from the last render, if any.
    pub fn view(&self) -> Option<GridView> {
        self.grid_area.map(|area| GridView::new(area, self.scroll))
    }

    /// Shows `message` in the footer for a couple of seconds.
    pub fn set_status(&mut self, message: impl Into<String>, now: Instant) {
        self.status_message = Some((message.into(), now + STATUS_MESSAGE_TTL));
    }

    /// Clears the status message if its expiry time has passed.
    ///
    /// Returns `true` if a message was cleared.
    pub fn expire_status_message(&mut self, now: Instant) -> bool {
        match &self.status_message {
            Some((_, expiry)) if now >= *expiry => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }

    /// Periodic housekeeping. Returns `true` if anything visible changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.tick_count += 1;
        let pulse_cleared = self.resize.tick(now);
        let status_cleared = self.expire_status_message(now);
        pulse_cleared || status_cleared
    }

    /// Drains store notifications. Returns `true` if any arrived.
    pub fn drain_updates(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.updates.try_recv() {
                Ok(event) => {
                    tracing::trace!(?event, "layout event");
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "layout events lagged");
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if changed {
            self.sync_focus();
        }
        changed
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self) -> io::Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        let event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        terminal.draw(|frame| render_dashboard(frame, self))?;

        loop {
            let event = event_handler.next(&mut reader).await?;
            let now = Instant::now();
            let mut should_render = match event {
                Event::Key(key) => {
                    let action = handle_key_event(self, key);
                    self.perform(action, now);
                    true
                }
                Event::Mouse(mouse) => {
                    self.handle_mouse_event(mouse, now);
                    true
                }
                Event::Tick => self.on_tick(now),
                Event::Resize(_, _) => true,
            };
            should_render |= self.drain_updates();

            if self.should_quit {
                return Ok(());
            }
            if should_render {
                terminal.draw(|frame| render_dashboard(frame, self))?;
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
