//! `git-account-manager clone <alias> <url> [dir]`

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{account_service, repo_service};

/// Arguments for the clone command.
#[derive(Args, Debug, Clone)]
pub struct CloneArgs {
    /// Account alias
    pub alias: String,

    /// Repository URL as copied from the provider (SSH or HTTPS)
    pub url: String,

    /// Target directory [default: repository name]
    pub dir: Option<PathBuf>,
}

/// Run the clone command.
///
/// # Errors
///
/// Returns an error if the alias is unknown, the URL is for another
/// provider, or `git clone` fails.
pub async fn run(app: &AppContext, args: CloneArgs) -> Result<ExitCode> {
    let account = account_service::find_account(&app.ssh, &args.alias)?;
    let outcome = repo_service::clone_repo(
        &app.runner,
        &app.reporter(),
        &account,
        &args.url,
        args.dir.as_deref(),
    )
    .await?;
    app.renderer().cloned(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
