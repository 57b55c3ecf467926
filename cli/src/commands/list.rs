//! `git-account-manager list` — managed accounts.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::account_service;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if `~/.ssh/config` cannot be read or parsed.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let accounts = account_service::account_statuses(&app.ssh)?;
    app.renderer().accounts(&accounts)?;
    Ok(ExitCode::SUCCESS)
}
