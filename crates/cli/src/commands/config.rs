//! config commands - Manage the settings file
//!
//! The settings file holds defaults for the connection string, container and
//! list filters. Environment variables and flags take precedence over it.

use clap::Subcommand;
use serde::Serialize;

use bf_core::config::keys;
use bf_core::{Settings, SettingsManager};

use super::CommandResult;
use crate::output::Formatter;

/// Settings file subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Store a setting (connection_string, container, prefix, suffix)
    Set(SetArgs),

    /// Remove a setting
    Unset(UnsetArgs),

    /// Show stored settings; the connection string is redacted
    Show,

    /// Print the settings file location
    Path,
}

/// Arguments for the `config set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Setting name
    pub key: String,

    /// New value
    pub value: String,
}

/// Arguments for the `config unset` command
#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Setting name
    pub key: String,
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    path: String,
    settings: Vec<Entry>,
}

#[derive(Debug, Serialize)]
struct Entry {
    key: &'static str,
    value: Option<String>,
}

/// Execute a config subcommand
pub fn execute(cmd: ConfigCommands, formatter: &Formatter) -> CommandResult {
    let manager = SettingsManager::new()?;
    run(cmd, &manager, formatter)
}

fn run(cmd: ConfigCommands, manager: &SettingsManager, formatter: &Formatter) -> CommandResult {
    match cmd {
        ConfigCommands::Set(args) => {
            update(manager, &args.key, Some(args.value))?;
            formatter.done(&format!("Setting '{}' saved", args.key));
        }
        ConfigCommands::Unset(args) => {
            update(manager, &args.key, None)?;
            formatter.done(&format!("Setting '{}' removed", args.key));
        }
        ConfigCommands::Show => {
            let settings = manager.load()?;
            let entries = entries(&settings);
            if formatter.is_json() {
                formatter.json(&ShowOutput {
                    path: manager.config_path().display().to_string(),
                    settings: entries,
                });
            } else {
                for entry in entries {
                    let value = entry.value.as_deref().unwrap_or("(unset)");
                    formatter.println(&format!("{} = {value}", entry.key));
                }
            }
        }
        ConfigCommands::Path => {
            formatter.println(&manager.config_path().display().to_string());
        }
    }
    Ok(())
}

fn update(manager: &SettingsManager, key: &str, value: Option<String>) -> bf_core::Result<()> {
    let mut settings = manager.load()?;
    settings.storage.set(key, value)?;
    manager.save(&settings)
}

fn entries(settings: &Settings) -> Vec<Entry> {
    keys::ALL
        .iter()
        .map(|key| {
            let value = settings.storage.get(key.legacy).map(|v| {
                if *key == keys::CONNECTION_STRING {
                    "<redacted>".to_string()
                } else {
                    v.to_string()
                }
            });
            Entry {
                key: key.legacy,
                value,
            }
        })
        .collect()
}
