//! The layout store.
//!
//! [`LayoutStore`] is the single owner of the in-memory layout and the
//! edit-mode flag. Every mutation goes through it, is written through to
//! [`LayoutPersistence`] immediately (no debouncing) and is announced on a
//! broadcast channel so views can re-render.
//!
//! The store is synchronous: handlers call it inline and the broadcast
//! send never blocks, so it works with or without a running runtime.

use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::grid::{Axis, MIN_COL_SPAN, MIN_ROW_SPAN};
use crate::interaction::{Reorder, ResizeOutcome};
use crate::layout::{pack, Layout, LayoutError, Packing, PresetCatalog, WidgetPlacement};
use crate::persist::{CollectionError, LayoutPersistence, UserScope};
use crate::widgets::{WidgetDefinition, WidgetRegistry};

#[cfg(test)]
mod tests;

/// Capacity of the change notification channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A change announced to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// The whole layout was replaced.
    Replaced,
    /// A widget was appended.
    Added {
        /// New widget id.
        id: String,
    },
    /// A widget was removed.
    Removed {
        /// Removed widget id.
        id: String,
    },
    /// A widget moved within the order.
    Moved {
        /// Moved widget id.
        id: String,
        /// Previous index.
        from: usize,
        /// New index.
        to: usize,
    },
    /// A widget's span changed.
    Resized {
        /// Resized widget id.
        id: String,
        /// Axis that changed.
        axis: Axis,
        /// New span.
        span: u16,
    },
    /// A widget's options changed.
    Configured {
        /// Configured widget id.
        id: String,
    },
    /// A preset replaced the layout.
    PresetApplied {
        /// Preset name.
        name: String,
    },
    /// The layout was saved as a named collection.
    CollectionSaved {
        /// Collection name.
        name: String,
    },
    /// A named collection replaced the layout.
    CollectionActivated {
        /// Collection name.
        name: String,
    },
    /// A named collection was deleted.
    CollectionDeleted {
        /// Collection name.
        name: String,
    },
    /// The layout was reset to the default.
    Reset,
    /// Edit mode was switched.
    EditMode(bool),
}

/// One row of the add-widget panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AddPanelEntry<'a> {
    /// The widget type offered.
    pub definition: &'a WidgetDefinition,
    /// Whether the layout already holds a widget of this type.
    pub already_added: bool,
}

/// Owns the layout and applies every mutation to it.
pub struct LayoutStore {
    layout: Layout,
    registry: WidgetRegistry,
    presets: PresetCatalog,
    persistence: LayoutPersistence,
    edit_mode: bool,
    update_tx: broadcast::Sender<LayoutEvent>,
}

impl std::fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStore")
            .field("layout", &self.layout.ids())
            .field("edit_mode", &self.edit_mode)
            .field("persistence", &self.persistence)
            .field("subscriber_count", &self.update_tx.receiver_count())
            .finish()
    }
}

impl LayoutStore {
    /// Opens the store, loading (and if needed migrating) the saved layout.
    pub fn open(registry: WidgetRegistry, mut persistence: LayoutPersistence) -> Self {
        let layout = persistence.load_or_default();
        tracing::debug!(
            scope = %persistence.scope(),
            widgets = layout.len(),
            "layout store opened"
        );
        let (update_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            layout,
            registry,
            presets: PresetCatalog::new(),
            persistence,
            edit_mode: false,
            update_tx,
        }
    }

    /// Replaces the preset catalog.
    pub fn with_presets(mut self, presets: PresetCatalog) -> Self {
        self.presets = presets;
        self
    }

    /// Current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Looks up a placement by id.
    pub fn get(&self, id: &str) -> Option<&WidgetPlacement> {
        self.layout.get(id)
    }

    /// Widget registry in use.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Available presets.
    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    /// User scope the layout is stored under.
    pub fn scope(&self) -> &UserScope {
        self.persistence.scope()
    }

    /// Packs the current layout into grid cells.
    pub fn packing(&self) -> Packing<'_> {
        pack(&self.layout, &self.registry)
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LayoutEvent> {
        self.update_tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.update_tx.receiver_count()
    }

    /// Returns `true` while drag and resize affordances are live.
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Switches edit mode.
    pub fn set_edit_mode(&mut self, on: bool) {
        if self.edit_mode != on {
            self.edit_mode = on;
            self.notify(LayoutEvent::EditMode(on));
        }
    }

    /// Flips edit mode, returning the new value.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_edit_mode(!self.edit_mode);
        self.edit_mode
    }

    /// Replaces the whole layout.
    pub fn set(&mut self, layout: Layout) {
        self.layout = layout;
        self.commit(LayoutEvent::Replaced);
    }

    /// Appends a widget of `widget_type` with its default size.
    ///
    /// The id is `<type>-<unix millis>`. Returns the new id.
    pub fn add_widget(&mut self, widget_type: &str) -> Result<String, LayoutError> {
        self.add_widget_stamped(widget_type, chrono::Utc::now().timestamp_millis())
    }

    /// Same as [`LayoutStore::add_widget`] with an explicit id stamp.
    pub fn add_widget_stamped(
        &mut self,
        widget_type: &str,
        stamp: i64,
    ) -> Result<String, LayoutError> {
        let definition =
            self.registry
                .get(widget_type)
                .ok_or_else(|| LayoutError::UnknownWidgetType {
                    widget_type: widget_type.to_string(),
                })?;
        let id = self.layout.fresh_id(widget_type, stamp);
        let placement = WidgetPlacement::new(
            &id,
            widget_type,
            definition.default_col_span as i64,
            definition.default_row_span as i64,
        );
        self.layout.push(placement)?;
        tracing::info!(id = %id, widget_type, "widget added");
        self.commit(LayoutEvent::Added { id: id.clone() });
        Ok(id)
    }

    /// Removes the widget with `id`.
    pub fn remove_widget(&mut self, id: &str) -> Result<WidgetPlacement, LayoutError> {
        let removed = self
            .layout
            .remove(id)
            .ok_or_else(|| LayoutError::UnknownId { id: id.to_string() })?;
        tracing::info!(id, "widget removed");
        self.commit(LayoutEvent::Removed { id: id.to_string() });
        Ok(removed)
    }

    /// Moves `active` to the index currently held by `over`.
    ///
    /// Returns `false` (and changes nothing) when the ids are equal or
    /// either is missing.
    pub fn reorder(&mut self, active: &str, over: &str) -> bool {
        match self.layout.move_onto(active, over) {
            Some((from, to)) => {
                tracing::debug!(id = active, from, to, "widget moved");
                self.commit(LayoutEvent::Moved {
                    id: active.to_string(),
                    from,
                    to,
                });
                true
            }
            None => false,
        }
    }

    /// Applies a drop produced by the drag controller.
    pub fn apply_reorder(&mut self, reorder: &Reorder) -> bool {
        self.reorder(&reorder.active, &reorder.over)
    }

    /// Moves `id` to position `to` (0-based, clamped to the last index).
    pub fn move_widget(&mut self, id: &str, to: usize) -> Result<bool, LayoutError> {
        let from = self
            .layout
            .index_of(id)
            .ok_or_else(|| LayoutError::UnknownId { id: id.to_string() })?;
        let to = to.min(self.layout.len().saturating_sub(1));
        if !self.layout.move_index(from, to) {
            return Ok(false);
        }
        self.commit(LayoutEvent::Moved {
            id: id.to_string(),
            from,
            to,
        });
        Ok(true)
    }

    /// Smallest span allowed for `id` along `axis`.
    ///
    /// Uses the registry definition's minimum when it has one.
    pub fn min_span(&self, id: &str, axis: Axis) -> u16 {
        self.layout
            .get(id)
            .and_then(|p| self.registry.get(&p.widget_type))
            .map(|d| d.min_span(axis))
            .unwrap_or(match axis {
                Axis::Width => MIN_COL_SPAN,
                Axis::Height => MIN_ROW_SPAN,
            })
    }

    /// Sets the span of `id` along `axis`, clamped to its bounds.
    ///
    /// Returns the stored span. Nothing is written when it did not change.
    pub fn resize(&mut self, id: &str, axis: Axis, span: i64) -> Result<u16, LayoutError> {
        let before = self
            .layout
            .get(id)
            .map(|p| p.span(axis))
            .ok_or_else(|| LayoutError::UnknownId { id: id.to_string() })?;
        let min = self.min_span(id, axis);
        let stored = self.layout.set_span(id, axis, span, min)?;
        if stored != before {
            self.commit(LayoutEvent::Resized {
                id: id.to_string(),
                axis,
                span: stored,
            });
        }
        Ok(stored)
    }

    /// Applies a committed resize outcome; other outcomes are ignored.
    pub fn apply_resize(&mut self, outcome: &ResizeOutcome) -> Result<Option<u16>, LayoutError> {
        match outcome {
            ResizeOutcome::Committed {
                widget_id,
                axis,
                span,
            } => self.resize(widget_id, *axis, *span as i64).map(Some),
            _ => Ok(None),
        }
    }

    /// Merges `options` into the widget's configuration.
    ///
    /// Every key must be a configurable option of the widget's type.
    pub fn configure(&mut self, id: &str, options: Map<String, Value>) -> Result<(), LayoutError> {
        let placement = self
            .layout
            .get(id)
            .ok_or_else(|| LayoutError::UnknownId { id: id.to_string() })?;
        let definition = self.registry.get(&placement.widget_type).ok_or_else(|| {
            LayoutError::UnknownWidgetType {
                widget_type: placement.widget_type.clone(),
            }
        })?;
        if let Some(key) = options.keys().find(|k| !definition.supports_option(k)) {
            return Err(LayoutError::UnsupportedOption {
                widget_type: definition.widget_type.to_string(),
                option: key.clone(),
            });
        }
        self.layout.configure(id, options)?;
        self.commit(LayoutEvent::Configured { id: id.to_string() });
        Ok(())
    }

    /// Replaces the layout with the named preset.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), LayoutError> {
        let layout = self.presets.get(name)?.to_layout()?;
        self.layout = layout;
        tracing::info!(preset = name, "preset applied");
        self.commit(LayoutEvent::PresetApplied {
            name: name.to_string(),
        });
        Ok(())
    }

    /// Saves the current layout as the collection `name`.
    ///
    /// An existing collection with that name is overwritten.
    pub fn save_collection(&mut self, name: &str) -> Result<(), CollectionError> {
        self.persistence.save_collection(name, &self.layout)?;
        self.notify(LayoutEvent::CollectionSaved {
            name: name.trim().to_string(),
        });
        Ok(())
    }

    /// Names of the saved collections, sorted.
    pub fn collections(&self) -> Result<Vec<String>, CollectionError> {
        self.persistence.collections()
    }

    /// Replaces the layout with the collection `name`.
    ///
    /// The collection itself is left as it was; later edits change the live
    /// layout only.
    pub fn activate_collection(&mut self, name: &str) -> Result<(), CollectionError> {
        self.layout = self.persistence.load_collection(name)?;
        let name = name.trim().to_string();
        tracing::info!(collection = %name, widgets = self.layout.len(), "collection activated");
        self.commit(LayoutEvent::CollectionActivated { name });
        Ok(())
    }

    /// Deletes the collection `name`. The live layout is untouched.
    pub fn delete_collection(&mut self, name: &str) -> Result<(), CollectionError> {
        self.persistence.delete_collection(name)?;
        self.notify(LayoutEvent::CollectionDeleted {
            name: name.trim().to_string(),
        });
        Ok(())
    }

    /// Clears the saved layout, restores the default and leaves edit mode.
    pub fn reset(&mut self) {
        self.layout = self.persistence.reset();
        self.set_edit_mode(false);
        self.notify(LayoutEvent::Reset);
    }

    /// Registry entries for the add-widget panel, in registry order.
    pub fn add_panel(&self) -> Vec<AddPanelEntry<'_>> {
        self.registry
            .definitions()
            .map(|definition| AddPanelEntry {
                definition,
                already_added: self.layout.contains_type(definition.widget_type),
            })
            .collect()
    }

    fn commit(&mut self, event: LayoutEvent) {
        self.persistence.save(&self.layout);
        self.notify(event);
    }

    fn notify(&self, event: LayoutEvent) {
        match self.update_tx.send(event) {
            Ok(count) => {
                tracing::trace!("Layout event sent to {} subscribers", count);
            }
            Err(_) => {
                tracing::trace!("No subscribers for layout event");
            }
        }
    }
}
