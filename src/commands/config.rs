//! Configuration file commands (`init`, `path`, `validate`).

use crate::ConfigAction;
use dashboard_grid::config::{default, xdg, ConfigError, ConfigLoader};
use std::path::Path;
use std::process::ExitCode;

/// Runs a `dgrid config` subcommand against `config_path` or the XDG default.
pub(crate) fn run_config_command(config_path: Option<&Path>, action: ConfigAction) -> ExitCode {
    let result: Result<(), ConfigError> = match action {
        ConfigAction::Init { force } => match config_path {
            Some(path) => default::create_default_config_at(path, force).map(|()| {
                println!("Created configuration at {}", path.display());
            }),
            None => default::create_default_config(force).map(|path| {
                println!("Created configuration at {}", path.display());
            }),
        },
        ConfigAction::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(config_path).and_then(|config| {
            config.validate()?;
            println!("Configuration is valid");
            println!("{config:#?}");
            Ok(())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}
