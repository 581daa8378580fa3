//! Scripted layout commands.
//!
//! Each command opens the store for the resolved user scope, applies one
//! change (which the store writes through) and prints a short summary.

use super::{Context, GlobalArgs};
use crate::{CollectionAction, LayoutAction, OutputFormat};
use dashboard_grid::grid::Axis;
use dashboard_grid::layout::LayoutError;
use dashboard_grid::logging;
use dashboard_grid::persist::CollectionError;
use dashboard_grid::store::LayoutStore;
use serde_json::{Map, Value};
use std::fmt::Display;
use std::process::ExitCode;

/// Runs a `dgrid layout` subcommand.
pub(crate) fn run_layout_command(globals: &GlobalArgs, action: LayoutAction) -> ExitCode {
    let ctx = match Context::resolve(globals) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(ctx.config.log.level);
    let mut store = match ctx.open_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match action {
        LayoutAction::Show { format } => {
            show_layout(&store, format);
            Ok(())
        }
        LayoutAction::Add { widget_type } => store.add_widget(&widget_type).map(|id| {
            println!("Added {id}");
        }),
        LayoutAction::Remove { id } => store.remove_widget(&id).map(|removed| {
            println!("Removed {}", removed.id);
        }),
        LayoutAction::Move { id, onto } => move_widget(&mut store, &id, &onto),
        LayoutAction::Resize { id, cols, rows } => resize_widget(&mut store, &id, cols, rows),
        LayoutAction::Configure { id, set } => configure_widget(&mut store, &id, &set),
        LayoutAction::Preset { name } => store.apply_preset(&name).map(|()| {
            println!("Applied preset '{name}'");
        }),
        LayoutAction::Presets => {
            for preset in store.presets().iter() {
                println!("{:<12} {}", preset.name, preset.description);
            }
            Ok(())
        }
        LayoutAction::Reset => {
            store.reset();
            println!("Layout reset to default");
            Ok(())
        }
        LayoutAction::Collection { action } => {
            return exit_code(run_collection_action(&mut store, action));
        }
    };

    exit_code(result)
}

fn exit_code<E: Display>(result: Result<(), E>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_collection_action(
    store: &mut LayoutStore,
    action: CollectionAction,
) -> Result<(), CollectionError> {
    match action {
        CollectionAction::Save { name } => {
            store.save_collection(&name)?;
            println!(
                "Saved {} widgets as collection '{}'",
                store.layout().len(),
                name.trim()
            );
        }
        CollectionAction::List => {
            let names = store.collections()?;
            if names.is_empty() {
                println!("No saved collections for {}", store.scope());
            }
            for name in names {
                println!("{name}");
            }
        }
        CollectionAction::Activate { name } => {
            store.activate_collection(&name)?;
            println!(
                "Activated collection '{}': {}",
                name.trim(),
                store.layout().ids().join(", ")
            );
        }
        CollectionAction::Delete { name } => {
            store.delete_collection(&name)?;
            println!("Deleted collection '{}'", name.trim());
        }
    }
    Ok(())
}

/// Runs `dgrid widgets`: the registry with "added" markers.
pub(crate) fn run_widgets_command(globals: &GlobalArgs) -> ExitCode {
    let ctx = match Context::resolve(globals) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(ctx.config.log.level);
    let store = match ctx.open_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{:<17} {:>5}  {:<22} ADDED", "TYPE", "SIZE", "TITLE");
    for entry in store.add_panel() {
        let definition = entry.definition;
        println!(
            "{:<17} {:>5}  {:<22} {}",
            definition.widget_type,
            format!(
                "{}x{}",
                definition.default_col_span, definition.default_row_span
            ),
            definition.title,
            if entry.already_added { "yes" } else { "" }
        );
    }
    ExitCode::SUCCESS
}

fn show_layout(store: &LayoutStore, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(store.layout()) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e}"),
        },
        OutputFormat::Table => {
            println!("user: {} ({} widgets)", store.scope(), store.layout().len());
            println!(
                "{:>2}  {:<28} {:<17} {:>4} {:>4}  TITLE",
                "#", "ID", "TYPE", "COLS", "ROWS"
            );
            for (index, placement) in store.layout().iter().enumerate() {
                let title = store
                    .registry()
                    .get(&placement.widget_type)
                    .map(|d| d.display_title(placement).to_string())
                    .unwrap_or_else(|| "(unknown type)".to_string());
                println!(
                    "{:>2}  {:<28} {:<17} {:>4} {:>4}  {}",
                    index + 1,
                    placement.id,
                    placement.widget_type,
                    placement.col_span,
                    placement.row_span,
                    title
                );
            }
        }
    }
}

fn move_widget(store: &mut LayoutStore, id: &str, onto: &str) -> Result<(), LayoutError> {
    for candidate in [id, onto] {
        if store.get(candidate).is_none() {
            return Err(LayoutError::UnknownId {
                id: candidate.to_string(),
            });
        }
    }
    if store.reorder(id, onto) {
        println!("Moved {id}: {}", store.layout().ids().join(", "));
    } else {
        println!("Nothing to move");
    }
    Ok(())
}

fn resize_widget(
    store: &mut LayoutStore,
    id: &str,
    cols: Option<i64>,
    rows: Option<i64>,
) -> Result<(), LayoutError> {
    for (axis, requested) in [(Axis::Width, cols), (Axis::Height, rows)] {
        let Some(requested) = requested else {
            continue;
        };
        let stored = store.resize(id, axis, requested)?;
        if stored as i64 != requested {
            println!("{axis} {requested} is out of range, clamped to {stored}");
        }
    }
    if let Some(placement) = store.get(id) {
        println!(
            "Resized {id} to {}x{}",
            placement.col_span, placement.row_span
        );
    }
    Ok(())
}

fn configure_widget(store: &mut LayoutStore, id: &str, set: &[String]) -> Result<(), LayoutError> {
    let mut options = Map::new();
    for pair in set {
        let (key, value) = parse_option(pair);
        options.insert(key, value);
    }
    store.configure(id, options)?;
    println!("Configured {id}");
    Ok(())
}

/// Splits `key=value`. The value is read as JSON when it parses, otherwise
/// kept as a string; a bare `key` means `true`.
pub(crate) fn parse_option(pair: &str) -> (String, Value) {
    match pair.split_once('=') {
        Some((key, raw)) => {
            let value =
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            (key.trim().to_string(), value)
        }
        None => (pair.trim().to_string(), Value::Bool(true)),
    }
}
