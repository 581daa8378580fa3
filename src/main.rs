//! Dashboard Grid - CLI entry point
//!
//! This binary opens the interactive dashboard and offers scripted access to
//! the same layout operations (add, remove, reorder, resize, presets and
//! named collections).

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_config_command, run_layout_command, run_tui_command, run_widgets_command, GlobalArgs,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Configurable dashboard widget grid
#[derive(Parser)]
#[command(name = "dgrid")]
#[command(version, about = "Configurable dashboard widget grid")]
pub(crate) struct Cli {
    /// Configuration file (defaults to the XDG location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// User whose layout is read and written
    #[arg(long, global = true)]
    user: Option<String>,

    /// Directory holding layout files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the dgrid CLI
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Launch the terminal dashboard
    Tui {
        /// Start with edit mode on
        #[arg(long)]
        edit: bool,
    },

    /// Inspect and edit the stored layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// List available widget types
    Widgets,

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
pub(crate) enum LayoutAction {
    /// Print the layout in display order
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Append a widget of the given type
    Add {
        /// Widget type (see `dgrid widgets`)
        widget_type: String,
    },
    /// Remove a widget by id
    Remove {
        /// Widget id
        id: String,
    },
    /// Move a widget into another widget's position
    Move {
        /// Widget id to move
        id: String,
        /// Widget id whose position it takes
        #[arg(long)]
        onto: String,
    },
    /// Set a widget's column and/or row span
    Resize {
        /// Widget id
        id: String,
        /// Column span (1-48)
        #[arg(long, allow_negative_numbers = true, required_unless_present = "rows")]
        cols: Option<i64>,
        /// Row span (at least 5)
        #[arg(long, allow_negative_numbers = true)]
        rows: Option<i64>,
    },
    /// Set widget options as key=value pairs
    Configure {
        /// Widget id
        id: String,
        /// Option to set; the value is read as JSON, else as text
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        set: Vec<String>,
    },
    /// Replace the layout with a named preset
    Preset {
        /// Preset name (see `dgrid layout presets`)
        name: String,
    },
    /// List available presets
    Presets,
    /// Restore the default layout
    Reset,
    /// Save, list and switch between named layouts
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },
}

/// Actions for the `layout collection` subcommand.
#[derive(Subcommand)]
pub(crate) enum CollectionAction {
    /// Save the current layout under a name (overwrites)
    Save {
        /// Collection name
        name: String,
    },
    /// List saved collections
    List,
    /// Replace the current layout with a saved collection
    Activate {
        /// Collection name
        name: String,
    },
    /// Delete a saved collection
    Delete {
        /// Collection name
        name: String,
    },
}

/// Output format for `layout show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Aligned columns
    Table,
    /// Pretty-printed placement array
    Json,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let globals = GlobalArgs {
        config: cli.config,
        user: cli.user,
        data_dir: cli.data_dir,
    };

    match cli.command {
        Commands::Tui { edit } => run_tui_command(&globals, edit),
        Commands::Layout { action } => run_layout_command(&globals, action),
        Commands::Widgets => run_widgets_command(&globals),
        Commands::Config { action } => run_config_command(globals.config.as_deref(), action),
    }
}

#[cfg(test)]
mod cli_tests;
