use super::*;
use crate::grid::Axis;
use crate::layout::GridRect;
use crate::tui::event::Action;
use crate::tui::grid_view::Zone;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

impl App {
    /// Applies a key action.
    pub fn perform(&mut self, action: Action, now: Instant) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::ToggleEditMode => {
                let on = self.store.toggle_edit_mode();
                if !on {
                    self.drag.cancel();
                    self.resize.end();
                }
                self.set_status(if on { "Edit mode on" } else { "Edit mode off" }, now);
            }
            Action::FocusNext => self.move_focus(1),
            Action::FocusPrevious => self.move_focus(-1),
            Action::PickUpOrDrop => self.pick_up_or_drop(),
            Action::StepTarget(delta) => {
                self.drag.step(&self.store.layout().ids(), delta);
            }
            Action::Cancel => {
                if self.add_panel.take().is_none() {
                    self.drag.cancel();
                }
            }
            Action::Nudge { axis, delta } => self.nudge(axis, delta, now),
            Action::OpenAddPanel => {
                self.drag.cancel();
                self.add_panel = Some(0);
            }
            Action::AddPanelStep(delta) => {
                let last = self.store.registry().len().saturating_sub(1) as isize;
                if let Some(selected) = self.add_panel.as_mut() {
                    *selected = (*selected as isize + delta).clamp(0, last) as usize;
                }
            }
            Action::AddSelected => self.add_selected(now),
            Action::RemoveFocused => self.remove_focused(now),
            Action::ApplyPreset(index) => self.apply_preset(index, now),
            Action::Reset => {
                self.drag.cancel();
                self.resize.end();
                self.store.reset();
                self.scroll = 0;
                self.focused = None;
                self.sync_focus();
                self.set_status("Layout reset to default", now);
            }
            Action::Scroll(rows) => self.scroll_by(rows),
        }
    }

    /// Handles a mouse event on the grid.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        let Some(view) = self.view() else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.mouse_down(&view, mouse.column, mouse.row)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.mouse_drag(&view, mouse.column, mouse.row, now)
            }
            MouseEventKind::Up(MouseButton::Left) => self.mouse_up(),
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS),
            _ => {}
        }
    }

    fn mouse_down(&mut self, view: &GridView, column: u16, row: u16) {
        if self.add_panel.is_some() || self.carrying() {
            return;
        }
        let hit = {
            let packing = self.store.packing();
            view.hit(&packing, column, row)
                .map(|(widget, zone)| (widget.placement.clone(), zone, view.geometry.rect(widget)))
        };
        let Some((placement, zone, rendered)) = hit else {
            return;
        };
        self.focused = Some(placement.id.clone());

        let editing = self.store.edit_mode();
        if !editing {
            return;
        }
        let (px, py) = view.pointer_px(view.content_cell_clamped(column, row));
        match zone {
            Zone::RightEdge => self.begin_resize(&placement, Axis::Width, px, &rendered),
            Zone::BottomEdge => self.begin_resize(&placement, Axis::Height, py, &rendered),
            Zone::Body => self.drag.press(editing, &placement.id, (px, py)),
        }
    }

    fn begin_resize(
        &mut self,
        placement: &WidgetPlacement,
        axis: Axis,
        pointer: f64,
        rendered: &GridRect,
    ) {
        if let Err(e) = self
            .resize
            .begin(self.store.edit_mode(), placement, axis, pointer, rendered)
        {
            tracing::debug!(error = %e, "resize not started");
        }
    }

    fn mouse_drag(&mut self, view: &GridView, column: u16, row: u16, now: Instant) {
        let (px, py) = view.pointer_px(view.content_cell_clamped(column, row));

        if let Some(session) = self.resize.session() {
            let axis = session.axis;
            let id = session.widget_id.clone();
            let Some(current) = self.store.get(&id).map(|p| p.span(axis)) else {
                self.resize.end();
                return;
            };
            let pointer = match axis {
                Axis::Width => px,
                Axis::Height => py,
            };
            let outcome = self.resize.pointer_move(pointer, current, now);
            if let Err(e) = self.store.apply_resize(&outcome) {
                tracing::warn!(error = %e, "resize could not be applied");
                self.resize.end();
            }
            return;
        }

        let over = {
            let packing = self.store.packing();
            view.hit(&packing, column, row)
                .map(|(widget, _)| widget.placement.id.clone())
        };
        self.drag.pointer_move((px, py), over.as_deref());
    }

    fn mouse_up(&mut self) {
        if self.resize.end().is_some() {
            return;
        }
        if let Some(reorder) = self.drag.release() {
            self.store.apply_reorder(&reorder);
        }
    }

    fn pick_up_or_drop(&mut self) {
        if self.carrying() {
            if let Some(reorder) = self.drag.drop_target() {
                self.store.apply_reorder(&reorder);
            }
            return;
        }
        if let Some(id) = self.focused.clone() {
            self.drag.pick_up(self.store.edit_mode(), &id);
        }
    }

    fn nudge(&mut self, axis: Axis, delta: i64, now: Instant) {
        let Some(placement) = self.focused_placement().cloned() else {
            return;
        };
        match self
            .resize
            .nudge(self.store.edit_mode(), &placement, axis, delta, now)
        {
            Ok(outcome) => {
                if let Err(e) = self.store.apply_resize(&outcome) {
                    self.set_status(e.to_string(), now);
                }
            }
            Err(e) => self.set_status(e.to_string(), now),
        }
    }

    fn add_selected(&mut self, now: Instant) {
        let Some(selected) = self.add_panel else {
            return;
        };
        let Some(definition) = self.store.registry().definitions().nth(selected) else {
            return;
        };
        let widget_type = definition.widget_type;
        let title = definition.title.clone();
        match self.store.add_widget(widget_type) {
            Ok(id) => {
                self.add_panel = None;
                self.focused = Some(id);
                self.ensure_focus_visible();
                self.set_status(format!("Added {title}"), now);
            }
            Err(e) => self.set_status(e.to_string(), now),
        }
    }

    fn remove_focused(&mut self, now: Instant) {
        let Some(id) = self.focused.clone() else {
            return;
        };
        let index = self.store.layout().index_of(&id).unwrap_or(0);
        match self.store.remove_widget(&id) {
            Ok(removed) => {
                let ids = self.store.layout().ids();
                self.focused = ids
                    .get(index.min(ids.len().saturating_sub(1)))
                    .map(|id| id.to_string());
                self.set_status(format!("Removed {}", removed.id), now);
            }
            Err(e) => self.set_status(e.to_string(), now),
        }
    }

    fn apply_preset(&mut self, index: u8, now: Instant) {
        let Some(name) = self.store.presets().by_index(index).map(|p| p.name.clone()) else {
            self.set_status(format!("No preset {index}"), now);
            return;
        };
        self.drag.cancel();
        self.resize.end();
        match self.store.apply_preset(&name) {
            Ok(()) => {
                self.scroll = 0;
                self.focused = None;
                self.sync_focus();
                self.set_status(format!("Preset: {name}"), now);
            }
            Err(e) => self.set_status(e.to_string(), now),
        }
    }

    /// Moves focus `delta` places through the layout order, wrapping.
    pub(super) fn move_focus(&mut self, delta: isize) {
        let ids = self.store.layout().ids();
        if ids.is_empty() {
            self.focused = None;
            return;
        }
        let len = ids.len() as isize;
        let next = match self
            .focused
            .as_deref()
            .and_then(|id| ids.iter().position(|candidate| *candidate == id))
        {
            Some(current) => (current as isize + delta).rem_euclid(len) as usize,
            None => 0,
        };
        self.focused = Some(ids[next].to_string());
        self.ensure_focus_visible();
    }

    /// Keeps `focused` pointing at an existing widget.
    pub(super) fn sync_focus(&mut self) {
        let present = self
            .focused
            .as_deref()
            .is_some_and(|id| self.store.get(id).is_some());
        if !present {
            self.focused = self.store.layout().ids().first().map(|id| id.to_string());
        }
    }

    fn scroll_by(&mut self, rows: i32) {
        let max = match self.view() {
            Some(view) => view.max_scroll(&self.store.packing()),
            None => u32::MAX,
        };
        let next = (self.scroll as i64 + rows as i64).clamp(0, max as i64);
        self.scroll = next as u32;
    }

    /// Scrolls so the focused widget's top edge is on screen.
    fn ensure_focus_visible(&mut self) {
        let (Some(view), Some(id)) = (self.view(), self.focused.as_deref()) else {
            return;
        };
        let packing = self.store.packing();
        let Some(widget) = packing.find(id) else {
            return;
        };
        let cells = view.widget_cells(widget);
        let height = view.area.height as u32;
        if cells.y < self.scroll {
            self.scroll = cells.y;
        } else if cells.y.saturating_add(cells.height) > self.scroll + height {
            let bottom_aligned = (cells.y + cells.height).saturating_sub(height);
            self.scroll = bottom_aligned.min(cells.y);
        }
    }
}
