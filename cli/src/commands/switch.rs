//! `git-account-manager use <alias>` — bind a repository (or the global
//! Git config) to an account.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::account_service;
use crate::application::services::repo_service::{self, IdentityScope};

/// Arguments for the use command.
#[derive(Args, Debug, Clone)]
pub struct UseArgs {
    /// Account alias
    pub alias: String,

    /// Repository to configure
    #[arg(long, default_value = ".", conflicts_with = "global")]
    pub path: PathBuf,

    /// Set the identity in the global Git config instead
    #[arg(long)]
    pub global: bool,

    /// Remote whose URL is rewritten to the account's host alias
    #[arg(long, default_value = "origin")]
    pub remote: String,
}

/// Run the use command.
///
/// # Errors
///
/// Returns an error if the alias is unknown, the path is not a repository,
/// or the remote belongs to a different provider.
pub async fn run(app: &AppContext, args: UseArgs) -> Result<ExitCode> {
    let account = account_service::find_account(&app.ssh, &args.alias)?;
    let scope = if args.global {
        IdentityScope::Global
    } else {
        IdentityScope::Repo(args.path)
    };

    let outcome =
        repo_service::use_account(&app.runner, &app.reporter(), &account, &scope, &args.remote)
            .await?;
    app.renderer().used(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
