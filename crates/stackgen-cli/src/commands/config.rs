//! `stackgen config`: inspect the application settings.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Keys accepted by `config get`.
pub const KNOWN_KEYS: [&str; 6] = [
    "http.timeout_secs",
    "http.user_agent",
    "retry.max_attempts",
    "retry.base_delay_ms",
    "output.no_color",
    "output.format",
];

pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            if output.is_json() {
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(config)?;
            } else {
                let serialised =
                    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise settings: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "http.timeout_secs" => Ok(config.http.timeout_secs.to_string()),
        "http.user_agent" => Ok(config.http.user_agent.clone()),
        "retry.max_attempts" => Ok(config.retry.max_attempts.to_string()),
        "retry.base_delay_ms" => Ok(config.retry.base_delay_ms.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!(
                "Unknown settings key '{key}' (known: {})",
                KNOWN_KEYS.join(", ")
            ),
            source: None,
        }),
    }
}
