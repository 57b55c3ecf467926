//! `git-account-manager remove <alias> [--delete-key]`

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::account_service;

/// Arguments for the remove command.
#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// Account alias
    pub alias: String,

    /// Also delete the key pair generated for this account
    #[arg(long)]
    pub delete_key: bool,
}

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if the alias is unknown or the config cannot be written.
pub fn run(app: &AppContext, args: &RemoveArgs) -> Result<ExitCode> {
    // Fail on an unknown alias before asking anything.
    let account = account_service::find_account(&app.ssh, &args.alias)?;

    let prompt = if args.delete_key {
        format!("Remove account '{}' and delete its key?", account.alias)
    } else {
        format!("Remove account '{}'?", account.alias)
    };
    if !app.non_interactive && !app.confirm(&prompt, false)? {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = account_service::remove_account(
        &app.ssh,
        &app.backups,
        &app.reporter(),
        &args.alias,
        args.delete_key,
        app.config.backup.keep,
    )?;
    app.renderer().removed(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
