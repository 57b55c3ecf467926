//! `git-account-manager config` — show and set settings.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;

/// Config subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show current settings
    Show,
    /// Set a setting
    Set {
        /// Setting key, e.g. `defaults.provider`
        key: String,
        /// New value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error for an unknown key, an invalid value, or an unreadable
/// settings file.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => {
            let config = config_service::load_config(&app.config_store)?;
            let path = app.config_store.path()?;
            app.renderer().config(&config, &path)?;
        }
        ConfigCommand::Set { key, value } => {
            let stored = config_service::set_config_value(&app.config_store, &key, &value)?;
            app.renderer().config_set(&key, &stored)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
