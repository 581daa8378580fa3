//! End-to-end tests of the grid engine through its public API.
//!
//! The first half walks through the user-facing scenarios (legacy upgrade,
//! resizing into a limit, drag reorder, adding a widget). The second half
//! checks layout invariants over generated inputs with `proptest`.

use dashboard_grid::grid::{Axis, GRID_COLUMNS, MIN_ROW_SPAN, ROW_UNIT_PX};
use dashboard_grid::interaction::{
    DragReorderController, LimitPulse, ResizeController, ResizeOutcome,
    DEFAULT_ACTIVATION_DISTANCE, DEFAULT_PULSE,
};
use dashboard_grid::layout::{GridGeometry, Layout, LayoutMigrator, WidgetPlacement};
use dashboard_grid::persist::{FileBackend, LayoutPersistence, MemoryBackend, UserScope};
use dashboard_grid::store::LayoutStore;
use dashboard_grid::widgets::WidgetRegistry;
use proptest::prelude::*;
use serde_json::json;
use std::time::Instant;

fn scope() -> UserScope {
    UserScope::new("scenario")
}

/// Opens a store on `backend` for the scenario scope.
fn open(backend: &MemoryBackend) -> LayoutStore {
    let persistence = LayoutPersistence::new(Box::new(backend.clone()), scope());
    LayoutStore::open(WidgetRegistry::builtin(), persistence)
}

fn notes(ids: &[&str]) -> Layout {
    Layout::from_placements(
        ids.iter()
            .map(|id| WidgetPlacement::new(id, "notes", 12, 8))
            .collect(),
    )
    .expect("unique ids")
}

const TYPES: &[&str] = &[
    "stats",
    "upcoming",
    "team",
    "revenue",
    "calendar",
    "notes",
    "revenue-chart",
    "occupancy-chart",
    "quarterly-stats",
    "revenue-table",
];

/// Layouts of one to eight widgets with arbitrary in-bounds spans.
fn layouts() -> impl Strategy<Value = Layout> {
    prop::collection::vec(
        (
            prop::sample::select(TYPES),
            1..=(GRID_COLUMNS as i64),
            (MIN_ROW_SPAN as i64)..30,
        ),
        1..=8,
    )
    .prop_map(|specs| {
        let placements = specs
            .into_iter()
            .enumerate()
            .map(|(i, (widget_type, cols, rows))| {
                WidgetPlacement::new(&format!("{widget_type}-{i}"), widget_type, cols, rows)
            })
            .collect();
        Layout::from_placements(placements).expect("indexed ids are unique")
    })
}

fn id_at(store: &LayoutStore, index: &prop::sample::Index) -> String {
    let ids = store.layout().ids();
    ids[index.index(ids.len())].to_string()
}

// --- scenarios ---

#[test]
fn first_use_gets_the_default_layout() {
    let backend = MemoryBackend::new();
    let store = open(&backend);

    assert_eq!(store.layout().len(), 6);
    let stats = store.get("stats-1").expect("default has stats");
    assert_eq!(stats.widget_type, "stats");
    assert_eq!(stats.col_span, 48);
    assert_eq!(backend.write_count(), 0, "nothing to write on first use");
}

#[test]
fn legacy_layout_is_upgraded_once_and_written_back() {
    let backend = MemoryBackend::new();
    let legacy = json!([
        {"id": "stats-1", "type": "stats", "colSpan": 12, "rowSpan": 6},
        {"id": "notes-1", "type": "notes", "colSpan": 3, "rowSpan": 8},
        {"id": "team-1", "type": "team", "rowSpan": 12}
    ]);
    backend.insert(&scope(), &legacy.to_string());

    let store = open(&backend);
    let spans: Vec<_> = store.layout().iter().map(|p| p.col_span).collect();
    assert_eq!(spans, vec![48, 12, 48]);
    assert_eq!(store.get("notes-1").map(|p| p.row_span), Some(8));
    assert_eq!(backend.write_count(), 1);
    drop(store);

    let reopened = open(&backend);
    assert_eq!(reopened.get("stats-1").map(|p| p.col_span), Some(48));
    assert_eq!(backend.write_count(), 1, "second load must not migrate again");
}

#[test]
fn malformed_saved_layout_falls_back_without_deleting_it() {
    let backend = MemoryBackend::new();
    backend.insert(&scope(), "{not json");

    let store = open(&backend);
    assert_eq!(store.layout(), &Layout::builtin_default());
    assert_eq!(backend.get(&scope()).as_deref(), Some("{not json"));
}

#[test]
fn width_drag_past_the_minimum_stops_at_one_and_pulses() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    store.set(Layout::from_placements(vec![WidgetPlacement::new("w", "team", 10, 12)]).expect("one id"));
    store.set_edit_mode(true);

    // 480 wide: one column is 10 units.
    let geometry = GridGeometry::new(480.0);
    let rect = geometry.rect(store.packing().find("w").expect("packed"));
    let start = rect.right();

    let mut resize = ResizeController::new(ROW_UNIT_PX, LimitPulse::new(DEFAULT_PULSE));
    let placement = store.get("w").expect("present").clone();
    resize
        .begin(store.edit_mode(), &placement, Axis::Width, start, &rect)
        .expect("edit mode");

    let now = Instant::now();
    let mut rejected = 0;
    for step in 1..=15 {
        let current = store.get("w").map(|p| p.col_span).expect("present");
        let outcome = resize.pointer_move(start - step as f64 * 10.0, current, now);
        if matches!(outcome, ResizeOutcome::Rejected { .. }) {
            rejected += 1;
        }
        store.apply_resize(&outcome).expect("known id");
    }

    assert_eq!(store.get("w").map(|p| p.col_span), Some(1));
    assert_eq!(rejected, 6);
    assert!(resize.limit_reached_at(now));

    resize.end();
    assert_eq!(store.get("w").map(|p| p.col_span), Some(1));
    assert!(!resize.limit_reached_at(now + DEFAULT_PULSE));
}

#[test]
fn pointer_drag_a_onto_c() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    store.set(notes(&["A", "B", "C", "D"]));
    store.set_edit_mode(true);

    let mut drag = DragReorderController::new(DEFAULT_ACTIVATION_DISTANCE);
    drag.press(store.edit_mode(), "A", (5.0, 5.0));
    assert!(!drag.pointer_move((8.0, 5.0), Some("A")), "below activation distance");
    assert!(drag.pointer_move((250.0, 5.0), Some("C")));
    assert!(drag.is_faded("A"));

    let reorder = drag.release().expect("dropped on C");
    assert!(store.apply_reorder(&reorder));
    assert_eq!(store.layout().ids(), vec!["B", "C", "A", "D"]);
}

#[test]
fn keyboard_drag_matches_pointer_drag() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    store.set(notes(&["A", "B", "C", "D"]));
    store.set_edit_mode(true);

    let mut drag = DragReorderController::new(DEFAULT_ACTIVATION_DISTANCE);
    assert!(drag.pick_up(store.edit_mode(), "A"));
    let order: Vec<String> = store.layout().ids().iter().map(|s| s.to_string()).collect();
    let order: Vec<&str> = order.iter().map(String::as_str).collect();
    drag.step(&order, 1);
    drag.step(&order, 1);
    let reorder = drag.drop_target().expect("dropped on C");
    store.apply_reorder(&reorder);
    assert_eq!(store.layout().ids(), vec!["B", "C", "A", "D"]);
}

#[test]
fn drop_on_self_changes_nothing() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    store.set(notes(&["A", "B", "C", "D"]));
    store.set_edit_mode(true);
    let writes = backend.write_count();

    let mut drag = DragReorderController::new(DEFAULT_ACTIVATION_DISTANCE);
    drag.press(true, "B", (0.0, 0.0));
    drag.pointer_move((40.0, 0.0), Some("B"));
    if let Some(reorder) = drag.release() {
        assert!(!store.apply_reorder(&reorder));
    }
    assert_eq!(store.layout().ids(), vec!["A", "B", "C", "D"]);
    assert_eq!(backend.write_count(), writes);
}

#[test]
fn adding_notes_appends_and_marks_it_added() {
    let backend = MemoryBackend::new();
    let mut store = open(&backend);
    let before = store.layout().len();

    let notes_added = |store: &LayoutStore| {
        store
            .add_panel()
            .iter()
            .find(|e| e.definition.widget_type == "notes")
            .map(|e| e.already_added)
    };
    assert_eq!(notes_added(&store), Some(false));

    let id = store.add_widget("notes").expect("builtin type");
    assert_eq!(store.layout().len(), before + 1);
    assert_eq!(store.layout().ids().last().copied(), Some(id.as_str()));
    let placement = store.get(&id).expect("added");
    assert_eq!((placement.col_span, placement.row_span), (12, 8));
    assert!(!store.edit_mode());
    assert_eq!(notes_added(&store), Some(true));

    let second = store.add_widget_stamped("notes", 42).expect("builtin type");
    let third = store.add_widget_stamped("notes", 42).expect("builtin type");
    assert_ne!(second, third);
}

#[test]
fn scopes_do_not_share_layouts() {
    let backend = MemoryBackend::new();
    let alice = LayoutPersistence::new(Box::new(backend.clone()), UserScope::new("alice"));
    let mut store = LayoutStore::open(WidgetRegistry::builtin(), alice);
    store.remove_widget("stats-1").expect("default id");

    let bob = LayoutPersistence::new(Box::new(backend.clone()), UserScope::new("bob"));
    let other = LayoutStore::open(WidgetRegistry::builtin(), bob);
    assert!(other.get("stats-1").is_some());
}

#[test]
fn file_scopes_with_similar_names_do_not_share_layouts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let open_file = |user: &str| {
        let persistence =
            LayoutPersistence::new(Box::new(FileBackend::new(dir.path())), UserScope::new(user));
        LayoutStore::open(WidgetRegistry::builtin(), persistence)
    };

    let mut dotted = open_file("alice.b");
    dotted.add_widget_stamped("notes", 1).expect("builtin type");
    drop(dotted);

    for user in ["alice_b", "alice b", "alice/b", "alice%2Eb"] {
        let other = open_file(user);
        assert_eq!(
            other.layout(),
            &Layout::builtin_default(),
            "user {user} loaded alice.b's layout"
        );
    }
    assert_eq!(open_file("alice.b").layout().len(), 7);
}

// --- invariants over generated inputs ---

proptest! {
    #[test]
    fn migration_is_idempotent(
        legacy in any::<bool>(),
        others in prop::collection::vec(
            (prop::sample::select(TYPES[1..].to_vec()), 1i64..=48, 5i64..24),
            0..6,
        ),
    ) {
        let migrator = LayoutMigrator::new();
        let stats_cols = if legacy { 12 } else { 48 };
        // Only the first record is a stats widget; it alone drives detection.
        let mut records = vec![json!({
            "id": "stats-1",
            "type": "stats",
            "colSpan": stats_cols,
            "rowSpan": 6,
        })];
        for (i, (widget_type, cols, rows)) in others.into_iter().enumerate() {
            let cols = if legacy { (cols - 1) % 12 + 1 } else { cols };
            records.push(json!({
                "id": format!("w-{i}"),
                "type": widget_type,
                "colSpan": cols,
                "rowSpan": rows,
            }));
        }
        let payload = serde_json::Value::Array(records).to_string();

        let first = migrator.decode(&payload).expect("valid payload");
        prop_assert_eq!(first.migrated(), legacy);

        let again = serde_json::to_string(&first.layout).expect("serialisable");
        let second = migrator.decode(&again).expect("valid payload");
        prop_assert!(!second.migrated(), "upgraded layout was detected again: {}", again);
        prop_assert_eq!(second.layout, first.layout);
    }

    #[test]
    fn spans_stay_in_bounds_after_every_commit(
        nudges in prop::collection::vec(
            (any::<prop::sample::Index>(), any::<bool>(), -60i64..=60),
            1..80,
        ),
    ) {
        let backend = MemoryBackend::new();
        let mut store = open(&backend);
        store.set_edit_mode(true);
        let mut resize = ResizeController::default();
        let now = Instant::now();

        for (index, wide, delta) in nudges {
            let id = id_at(&store, &index);
            let axis = if wide { Axis::Width } else { Axis::Height };
            let placement = store.get(&id).expect("listed").clone();
            let outcome = resize
                .nudge(true, &placement, axis, delta, now)
                .expect("idle controller");
            store.apply_resize(&outcome).expect("known id");

            for p in store.layout().iter() {
                prop_assert!((1..=48).contains(&p.col_span), "{:?}", p);
                prop_assert!(p.row_span >= 5, "{:?}", p);
            }
        }
    }

    #[test]
    fn reorder_keeps_the_same_ids(
        moves in prop::collection::vec(
            (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
            1..60,
        ),
    ) {
        let backend = MemoryBackend::new();
        let mut store = open(&backend);
        let mut expected: Vec<String> = store.layout().ids().iter().map(|s| s.to_string()).collect();
        expected.sort();

        for (active, over) in moves {
            let before: Vec<String> = store.layout().ids().iter().map(|s| s.to_string()).collect();
            let active = id_at(&store, &active);
            let over = id_at(&store, &over);
            let moved = store.reorder(&active, &over);
            prop_assert_eq!(moved, active != over);

            let after: Vec<String> = store.layout().ids().iter().map(|s| s.to_string()).collect();
            if moved {
                prop_assert_eq!(
                    after.iter().position(|id| *id == active),
                    before.iter().position(|id| *id == over)
                );
            }
            let mut sorted = after;
            sorted.sort();
            prop_assert_eq!(&sorted, &expected);
        }
    }

    #[test]
    fn rejected_resize_changes_nothing(
        index in any::<prop::sample::Index>(),
        wide in any::<bool>(),
        grow in any::<bool>(),
        excess in 1i64..200,
    ) {
        let backend = MemoryBackend::new();
        let mut store = open(&backend);
        store.set_edit_mode(true);
        let mut resize = ResizeController::default();
        let now = Instant::now();
        let layout = store.layout().clone();
        let writes = backend.write_count();

        let id = id_at(&store, &index);
        let placement = store.get(&id).expect("listed").clone();
        let (axis, delta) = match (wide, grow) {
            (true, true) => (Axis::Width, GRID_COLUMNS as i64 - placement.col_span as i64 + excess),
            (true, false) => (Axis::Width, -(placement.col_span as i64 - 1) - excess),
            (false, _) => (
                Axis::Height,
                -(placement.row_span as i64 - MIN_ROW_SPAN as i64) - excess,
            ),
        };
        let outcome = resize
            .nudge(true, &placement, axis, delta, now)
            .expect("idle controller");
        prop_assert!(
            matches!(outcome, ResizeOutcome::Rejected { .. }),
            "{} {} {}", id, axis, delta
        );
        prop_assert_eq!(store.apply_resize(&outcome), Ok(None));

        prop_assert_eq!(store.layout(), &layout);
        prop_assert_eq!(backend.write_count(), writes);
        prop_assert!(resize.limit_reached_at(now));
    }

    #[test]
    fn saved_layouts_round_trip(layout in layouts()) {
        // A narrow stats widget reads as old-scale and is upgraded on load.
        prop_assume!(!layout
            .iter()
            .any(|p| p.widget_type == "stats" && p.col_span <= 12));

        let backend = MemoryBackend::new();
        {
            let mut store = open(&backend);
            store.set(layout.clone());
        }
        let reopened = open(&backend);
        prop_assert_eq!(reopened.layout(), &layout);
    }
}
