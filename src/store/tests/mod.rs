//! Tests for the LayoutStore module.
//!
//! Tests are organized into categories:
//! - `mutations`: add, remove, reorder, resize, configure, presets
//! - `persistence`: write-through, migration write-back, reset
//! - `collections`: named layout snapshots
//! - `subscriber`: broadcast channel and notifications

mod mutations;

use super::LayoutStore;
use crate::layout::{Layout, WidgetPlacement};
use crate::persist::{LayoutPersistence, MemoryBackend, UserScope};
use crate::widgets::WidgetRegistry;

/// Opens a store over a fresh in-memory backend, returning a handle to it.
pub(super) fn open_store() -> (MemoryBackend, LayoutStore) {
    let handle = MemoryBackend::new();
    let persistence = LayoutPersistence::new(Box::new(handle.clone()), UserScope::new("test"));
    let store = LayoutStore::open(WidgetRegistry::builtin(), persistence);
    (handle, store)
}

/// Opens a store holding notes widgets `A`, `B`, `C`, `D`.
pub(super) fn abcd_store() -> (MemoryBackend, LayoutStore) {
    let (handle, mut store) = open_store();
    let layout = Layout::from_placements(
        ["A", "B", "C", "D"]
            .iter()
            .map(|id| WidgetPlacement::new(id, "notes", 12, 8))
            .collect(),
    )
    .expect("unique ids");
    store.set(layout);
    (handle, store)
}
