//! `git-account-manager add` — register an account.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::account_service::{self, NewAccount};
use crate::commands::value_or_prompt;
use crate::domain::account::{KeyType, Provider};

/// Arguments for the add command.
#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Short unique name, e.g. `work` or `personal`
    pub alias: String,

    /// Commit author name for this account
    #[arg(long)]
    pub name: Option<String>,

    /// Commit email for this account
    #[arg(long)]
    pub email: Option<String>,

    /// github, gitlab, bitbucket or custom:<host> [default: from settings]
    #[arg(long)]
    pub provider: Option<String>,

    /// ed25519 or rsa [default: from settings]
    #[arg(long)]
    pub key_type: Option<String>,

    /// Reuse an existing private key instead of generating one
    #[arg(long, value_name = "PATH", conflicts_with = "no_keygen")]
    pub identity_file: Option<PathBuf>,

    /// Write the SSH block without generating a key
    #[arg(long)]
    pub no_keygen: bool,
}

/// Run the add command.
///
/// # Errors
///
/// Returns an error on invalid input, a duplicate alias or an I/O failure.
pub async fn run(app: &AppContext, args: AddArgs) -> Result<ExitCode> {
    let name = value_or_prompt(app, args.name, "--name", "Your name for commits")?;
    let email = value_or_prompt(app, args.email, "--email", "Email for this account")?;
    let provider = match args.provider {
        Some(p) => p.parse::<Provider>()?,
        None => app.config.default_provider(),
    };
    let key_type = match args.key_type {
        Some(k) => k.parse::<KeyType>()?,
        None => app.config.default_key_type(),
    };

    let existing_key = args
        .identity_file
        .map(|p| std::path::absolute(&p))
        .transpose()?;

    let request = NewAccount {
        alias: args.alias,
        name,
        email,
        provider,
        key_type,
        generate_key: existing_key.is_none() && !args.no_keygen,
        existing_key,
    };

    let outcome = account_service::add_account(
        &app.ssh,
        &app.backups,
        &app.runner,
        &app.reporter(),
        request,
        app.config.backup.keep,
    )
    .await?;
    app.renderer().added(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
