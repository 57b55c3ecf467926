//! `git-account-manager key <alias>` — print the public key to register.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::account_service;

/// Run the key command.
///
/// # Errors
///
/// Returns an error if the alias is unknown or its `.pub` file is missing.
pub fn run(app: &AppContext, alias: &str) -> Result<ExitCode> {
    let account = account_service::find_account(&app.ssh, alias)?;
    let key = account_service::read_public_key(&app.ssh, &account)?;
    app.renderer().public_key(alias, &key)?;
    Ok(ExitCode::SUCCESS)
}
