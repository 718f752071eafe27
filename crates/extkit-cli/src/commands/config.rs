//! `extkit config`: inspect configuration values.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<&Path>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| unknown_key(&key))?;
            println!("{value}");
        }

        ConfigCommands::List => {
            if output.is_json() {
                return output.json(&config);
            }
            output.header("Current configuration:")?;
            for key in AppConfig::KEYS {
                let value = config.get(key).unwrap_or_default();
                output.print(&format!("  {key} = {value}"))?;
            }
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::active_path(config_file).display());
        }
    }

    Ok(())
}

fn unknown_key(key: &str) -> CliError {
    CliError::ConfigError {
        message: format!(
            "Unknown config key '{key}'. Known keys: {}",
            AppConfig::KEYS.join(", ")
        ),
        source: None,
    }
}
