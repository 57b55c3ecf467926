//! `git-account-manager show <alias>`

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::account_service;

/// Run the show command.
///
/// # Errors
///
/// Returns an error if the alias is unknown or the config cannot be read.
pub fn run(app: &AppContext, alias: &str) -> Result<ExitCode> {
    let account = account_service::find_account(&app.ssh, alias)?;
    let status = account_service::status_of(&app.ssh, account);
    app.renderer().account(&status)?;
    Ok(ExitCode::SUCCESS)
}
