//! `git-account-manager backup` — snapshots of `~/.ssh/config`.

use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::BackupStore;
use crate::application::services::backup_service;
use crate::domain::backup::LATEST;

/// Backup subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum BackupCommand {
    /// Snapshot the current config
    Create,
    /// List snapshots, newest first
    List,
    /// Replace the config with a snapshot
    Restore {
        /// Snapshot file name, or `latest`
        #[arg(default_value = LATEST)]
        name: String,
    },
    /// Delete old snapshots
    Prune {
        /// Snapshots to keep [default: backup.keep]
        #[arg(long)]
        keep: Option<usize>,
    },
}

/// Run a backup subcommand.
///
/// # Errors
///
/// Returns an error if the snapshot does not exist or a file operation fails.
pub fn run(app: &AppContext, cmd: BackupCommand) -> Result<ExitCode> {
    let keep = app.config.backup.keep;
    match cmd {
        BackupCommand::Create => {
            let entry = backup_service::create_backup(&app.ssh, &app.backups, keep, Utc::now())?;
            app.renderer().backup_created(entry.as_ref())?;
        }
        BackupCommand::List => {
            let entries = backup_service::list_backups(&app.backups)?;
            app.renderer().backups(&entries, &app.backups.dir())?;
        }
        BackupCommand::Restore { name } => {
            if !app.non_interactive
                && !app.confirm(&format!("Replace ~/.ssh/config with {name}?"), false)?
            {
                app.output.info("Cancelled.");
                return Ok(ExitCode::SUCCESS);
            }
            let outcome =
                backup_service::restore_backup(&app.ssh, &app.backups, &name, keep, Utc::now())?;
            app.renderer().restored(&outcome)?;
        }
        BackupCommand::Prune { keep: requested } => {
            let keep = requested.unwrap_or(keep);
            let removed = backup_service::prune_backups(&app.backups, keep)?;
            app.renderer().pruned(&removed, keep)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
