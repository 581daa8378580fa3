//! Layout mutation tests for LayoutStore.

use super::{abcd_store, open_store};
use crate::grid::Axis;
use crate::interaction::{Reorder, ResizeOutcome};
use crate::layout::{Layout, LayoutError};
use serde_json::{json, Map};

#[test]
fn test_open_empty_backend_uses_default_layout() {
    let (_handle, store) = open_store();
    assert_eq!(store.layout(), &Layout::builtin_default());
    assert!(!store.edit_mode());
}

#[test]
fn test_add_widget_uses_registry_defaults() {
    let (_handle, mut store) = open_store();
    let id = store.add_widget_stamped("notes", 1_700_000_000_000).expect("known type");
    assert_eq!(id, "notes-1700000000000");
    let placement = store.get(&id).expect("added");
    assert_eq!((placement.col_span, placement.row_span), (12, 8));
    assert_eq!(store.layout().len(), 7);
    assert_eq!(store.layout().ids().last(), Some(&id.as_str()));
}

#[test]
fn test_add_widget_twice_same_stamp_gets_unique_ids() {
    let (_handle, mut store) = open_store();
    let first = store.add_widget_stamped("team", 42).expect("known type");
    let second = store.add_widget_stamped("team", 42).expect("known type");
    assert_ne!(first, second);
}

#[test]
fn test_add_widget_with_clock_id_prefix() {
    let (_handle, mut store) = open_store();
    let id = store.add_widget("calendar").expect("known type");
    assert!(id.starts_with("calendar-"));
}

#[test]
fn test_add_unknown_type_is_error() {
    let (_handle, mut store) = open_store();
    let err = store.add_widget("fiscal").expect_err("unknown type");
    assert!(matches!(err, LayoutError::UnknownWidgetType { .. }));
    assert_eq!(store.layout().len(), 6);
}

#[test]
fn test_add_does_not_enter_edit_mode() {
    let (_handle, mut store) = open_store();
    store.add_widget("notes").expect("known type");
    assert!(!store.edit_mode());
}

#[test]
fn test_add_panel_marks_added_types() {
    let (_handle, mut store) = open_store();
    let before = store.add_panel();
    assert_eq!(before.len(), 10);
    let notes = before
        .iter()
        .find(|e| e.definition.widget_type == "notes")
        .expect("notes offered");
    assert!(!notes.already_added);
    let stats = before
        .iter()
        .find(|e| e.definition.widget_type == "stats")
        .expect("stats offered");
    assert!(stats.already_added);

    store.add_widget("notes").expect("known type");
    let after = store.add_panel();
    assert!(after
        .iter()
        .any(|e| e.definition.widget_type == "notes" && e.already_added));
}

#[test]
fn test_remove_widget() {
    let (_handle, mut store) = abcd_store();
    let removed = store.remove_widget("B").expect("present");
    assert_eq!(removed.id, "B");
    assert_eq!(store.layout().ids(), vec!["A", "C", "D"]);
    assert!(matches!(
        store.remove_widget("B"),
        Err(LayoutError::UnknownId { .. })
    ));
}

#[test]
fn test_reorder_is_list_move() {
    let (_handle, mut store) = abcd_store();
    assert!(store.apply_reorder(&Reorder {
        active: "A".into(),
        over: "C".into()
    }));
    assert_eq!(store.layout().ids(), vec!["B", "C", "A", "D"]);
}

#[test]
fn test_reorder_same_id_is_noop() {
    let (_handle, mut store) = abcd_store();
    assert!(!store.reorder("C", "C"));
    assert!(!store.reorder("C", "missing"));
    assert_eq!(store.layout().ids(), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_move_widget_clamps_target() {
    let (_handle, mut store) = abcd_store();
    assert_eq!(store.move_widget("A", 99), Ok(true));
    assert_eq!(store.layout().ids(), vec!["B", "C", "D", "A"]);
    assert_eq!(store.move_widget("A", 3), Ok(false));
    assert!(store.move_widget("Z", 0).is_err());
}

#[test]
fn test_resize_clamps_to_bounds() {
    let (_handle, mut store) = abcd_store();
    assert_eq!(store.resize("A", Axis::Width, 60), Ok(48));
    assert_eq!(store.resize("A", Axis::Width, -3), Ok(1));
    assert_eq!(store.resize("A", Axis::Height, 2), Ok(5));
    assert_eq!(store.get("A").map(|p| (p.col_span, p.row_span)), Some((1, 5)));
}

#[test]
fn test_resize_honours_definition_minimum() {
    let (_handle, mut store) = abcd_store();
    let mut registry = store.registry().clone();
    let mut notes = registry.get("notes").expect("notes").clone();
    notes.min_col_span = Some(6);
    registry.register(notes);
    store.registry = registry;
    assert_eq!(store.min_span("A", Axis::Width), 6);
    assert_eq!(store.resize("A", Axis::Width, 2), Ok(6));
}

#[test]
fn test_apply_resize_only_commits() {
    let (_handle, mut store) = abcd_store();
    let committed = ResizeOutcome::Committed {
        widget_id: "B".into(),
        axis: Axis::Height,
        span: 14,
    };
    assert_eq!(store.apply_resize(&committed), Ok(Some(14)));
    assert_eq!(
        store.apply_resize(&ResizeOutcome::Rejected { candidate: 0 }),
        Ok(None)
    );
    assert_eq!(store.get("B").map(|p| p.row_span), Some(14));
}

#[test]
fn test_configure_accepts_known_options() {
    let (_handle, mut store) = abcd_store();
    let mut options = Map::new();
    options.insert("maxNotes".into(), json!(3));
    store.configure("A", options).expect("supported option");
    let placement = store.get("A").expect("present");
    let definition = store.registry().get("notes").expect("notes");
    assert_eq!(definition.merged_config(placement)["maxNotes"], json!(3));
}

#[test]
fn test_configure_rejects_unknown_option() {
    let (_handle, mut store) = abcd_store();
    let mut options = Map::new();
    options.insert("chartType".into(), json!("pie"));
    let err = store.configure("A", options).expect_err("unsupported");
    assert_eq!(
        err,
        LayoutError::UnsupportedOption {
            widget_type: "notes".into(),
            option: "chartType".into()
        }
    );
    assert!(store.get("A").and_then(|p| p.config.as_ref()).is_none());
}

#[test]
fn test_apply_preset_replaces_layout() {
    let (_handle, mut store) = abcd_store();
    store.apply_preset("finance").expect("builtin preset");
    assert!(store.layout().contains_type("revenue-table"));
    assert!(!store.layout().contains_type("notes"));
    assert!(matches!(
        store.apply_preset("nope"),
        Err(LayoutError::UnknownPreset { .. })
    ));
}

#[test]
fn test_reorder_preserves_id_multiset() {
    let (_handle, mut store) = abcd_store();
    let pairs = [("A", "D"), ("C", "A"), ("D", "B"), ("B", "B"), ("A", "C")];
    for (active, over) in pairs {
        store.reorder(active, over);
        let mut ids = store.layout().ids();
        ids.sort_unstable();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
    }
}
