//! CLI argument parsing tests.

use crate::{Cli, CollectionAction, Commands, ConfigAction, LayoutAction, OutputFormat};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn verify_cli() {
    // Verify the CLI configuration is valid
    Cli::command().debug_assert();
}

#[test]
fn test_no_subcommand_fails() {
    let result = Cli::try_parse_from(["dgrid"]);
    assert!(result.is_err());
}

#[test]
fn test_tui_edit_flag_default_false() {
    let cli = Cli::try_parse_from(["dgrid", "tui"]).unwrap();
    match cli.command {
        Commands::Tui { edit } => assert!(!edit),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_global_args_after_subcommand() {
    let cli = Cli::try_parse_from([
        "dgrid",
        "layout",
        "show",
        "--user",
        "alice",
        "--data-dir",
        "/tmp/layouts",
    ])
    .unwrap();
    assert_eq!(cli.user.as_deref(), Some("alice"));
    assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/layouts")));
    assert!(cli.config.is_none());
}

#[test]
fn test_layout_show_defaults_to_table() {
    let cli = Cli::try_parse_from(["dgrid", "layout", "show"]).unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Show { format },
        } => assert_eq!(format, OutputFormat::Table),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_show_json() {
    let cli = Cli::try_parse_from(["dgrid", "layout", "show", "--format", "json"]).unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Show { format },
        } => assert_eq!(format, OutputFormat::Json),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_show_rejects_unknown_format() {
    let result = Cli::try_parse_from(["dgrid", "layout", "show", "--format", "yaml"]);
    assert!(result.is_err());
}

#[test]
fn test_layout_move_requires_onto() {
    assert!(Cli::try_parse_from(["dgrid", "layout", "move", "notes-1"]).is_err());
    let cli =
        Cli::try_parse_from(["dgrid", "layout", "move", "notes-1", "--onto", "stats-1"]).unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Move { id, onto },
        } => {
            assert_eq!(id, "notes-1");
            assert_eq!(onto, "stats-1");
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_resize_needs_a_span() {
    let result = Cli::try_parse_from(["dgrid", "layout", "resize", "stats-1"]);
    assert!(result.is_err());
}

#[test]
fn test_layout_resize_accepts_negative_spans() {
    let cli =
        Cli::try_parse_from(["dgrid", "layout", "resize", "stats-1", "--cols", "-4"]).unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Resize { id, cols, rows },
        } => {
            assert_eq!(id, "stats-1");
            assert_eq!(cols, Some(-4));
            assert_eq!(rows, None);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_configure_collects_pairs() {
    let cli = Cli::try_parse_from([
        "dgrid",
        "layout",
        "configure",
        "notes-1",
        "--set",
        "maxNotes=3",
        "--set",
        "title=Todo",
    ])
    .unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Configure { id, set },
        } => {
            assert_eq!(id, "notes-1");
            assert_eq!(set, vec!["maxNotes=3", "title=Todo"]);
        }
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_collection_save_takes_name() {
    let cli = Cli::try_parse_from(["dgrid", "layout", "collection", "save", "Front desk"]).unwrap();
    match cli.command {
        Commands::Layout {
            action:
                LayoutAction::Collection {
                    action: CollectionAction::Save { name },
                },
        } => assert_eq!(name, "Front desk"),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_layout_collection_list() {
    let cli = Cli::try_parse_from(["dgrid", "layout", "collection", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Layout {
            action: LayoutAction::Collection {
                action: CollectionAction::List
            }
        }
    ));
}

#[test]
fn test_layout_collection_activate_requires_name() {
    let result = Cli::try_parse_from(["dgrid", "layout", "collection", "activate"]);
    assert!(result.is_err());
}

#[test]
fn test_config_init_force_flag() {
    let cli = Cli::try_parse_from(["dgrid", "config", "init", "--force"]).unwrap();
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(force),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_path_subcommand() {
    let cli = Cli::try_parse_from(["dgrid", "config", "path"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Config {
            action: ConfigAction::Path
        }
    ));
}
