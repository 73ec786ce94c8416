//! Config command - read and change persistent settings

use super::Result;
use crate::BoxofficeError;
use crate::cli::ConfigCommands;
use crate::completions::config_keys;
use crate::config::{BoxofficeConfig, KEYS};
use crate::ui::OutputWriter;
use std::path::Path;

fn unknown_key(key: &str) -> BoxofficeError {
    let known: Vec<String> = config_keys().into_iter().map(|c| c.value).collect();
    BoxofficeError::Failed(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        known.join(", ")
    ))
}

/// Split `key=value`, or take the value from the next argument
fn split_setting<'a>(setting: &'a str, value: Option<&'a str>) -> Result<(&'a str, &'a str)> {
    match (setting.split_once('='), value) {
        (Some((key, value)), None) => Ok((key.trim(), value.trim())),
        (None, Some(value)) => Ok((setting.trim(), value.trim())),
        _ => Err(BoxofficeError::Failed(
            "Invalid format. Use: boxoffice config set key=value".to_string(),
        )),
    }
}

/// Execute a config subcommand; `set` writes the file at `path`
///
/// # Errors
/// Returns an error for unknown keys, values of the wrong type, or when the
/// file cannot be written
pub fn execute(
    mut config: BoxofficeConfig,
    path: &Path,
    output: &dyn OutputWriter,
    command: &ConfigCommands,
) -> Result<()> {
    match command {
        ConfigCommands::Get { key } => {
            if !KEYS.contains(&key.as_str()) {
                return Err(unknown_key(key));
            }
            output.write(&config.get(key)?);
        }
        ConfigCommands::Set { setting, value } => {
            let (key, value) = split_setting(setting, value.as_deref())?;
            if !KEYS.contains(&key) {
                return Err(unknown_key(key));
            }
            config.set(key, value)?;
            config.save_to(path)?;
            output.success(&format!("Set {key} = {}", config.get(key)?));
        }
        ConfigCommands::List => {
            for key in KEYS {
                output.write(&format!("{key} = {}", config.get(key)?));
            }
        }
    }
    Ok(())
}
