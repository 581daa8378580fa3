//! The interactive dashboard command.

use super::{Context, GlobalArgs};
use dashboard_grid::logging;
use dashboard_grid::tui::app::App;
use std::process::ExitCode;

/// Runs `dgrid tui`, optionally starting in edit mode.
pub(crate) fn run_tui_command(globals: &GlobalArgs, edit: bool) -> ExitCode {
    let ctx = match Context::resolve(globals) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The terminal owns stdout and stderr while the dashboard runs.
    let log_file = ctx.log_file();
    if let Err(e) = logging::init_for_tui(ctx.config.log.level, log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }

    let (drag, resize, tick_rate) = match ctx.interaction() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = match ctx.open_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if edit || ctx.config.tui.start_in_edit_mode {
        store.set_edit_mode(true);
    }
    tracing::info!(scope = %ctx.scope, widgets = store.layout().len(), "starting dashboard");

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = App::new(store)
        .with_controllers(drag, resize)
        .with_tick_rate(tick_rate);
    if let Err(e) = rt.block_on(app.run()) {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
