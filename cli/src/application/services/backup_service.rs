//! Application service — snapshots of `~/.ssh/config`.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::application::ports::{BackupStore, SshStore};
use crate::domain::backup::{
    BackupEntry, backup_file_name, content_digest, resolve_backup, select_for_pruning,
    sort_newest_first,
};

/// Result of a restore.
#[derive(Debug)]
pub struct RestoreOutcome {
    /// Snapshot that was restored.
    pub restored: BackupEntry,
    /// Snapshot of the config as it was before the restore, if one was taken.
    pub safety_backup: Option<BackupEntry>,
}

/// Snapshot the current `~/.ssh/config`.
///
/// Returns `None` when there is no config yet or when it is byte-identical
/// to the newest snapshot. Applies retention afterwards.
///
/// # Errors
///
/// Returns an error if the config or backup directory cannot be read or written.
pub fn create_backup(
    ssh: &impl SshStore,
    backups: &impl BackupStore,
    keep: usize,
    now: DateTime<Utc>,
) -> Result<Option<BackupEntry>> {
    let Some(content) = ssh.read_config()? else {
        tracing::debug!("no ssh config to back up");
        return Ok(None);
    };

    let mut existing = backups.list()?;
    sort_newest_first(&mut existing);
    if let Some(newest) = existing.first() {
        let previous = backups.read(&newest.name)?;
        if content_digest(previous.as_bytes()) == content_digest(content.as_bytes()) {
            tracing::debug!(backup = %newest.name, "config unchanged since last backup");
            return Ok(None);
        }
    }

    let name = backup_file_name(now, &existing);
    let entry = backups
        .write(&name, &content)
        .with_context(|| format!("writing backup {name}"))?;
    tracing::info!(backup = %entry.name, "backed up ssh config");

    prune_backups(backups, keep)?;
    Ok(Some(entry))
}

/// All snapshots, newest first.
///
/// # Errors
///
/// Returns an error if the backup directory cannot be read.
pub fn list_backups(backups: &impl BackupStore) -> Result<Vec<BackupEntry>> {
    let mut entries = backups.list()?;
    sort_newest_first(&mut entries);
    Ok(entries)
}

/// Delete all but the newest `keep` snapshots. Returns the deleted names.
///
/// # Errors
///
/// Returns an error if a snapshot cannot be deleted.
pub fn prune_backups(backups: &impl BackupStore, keep: usize) -> Result<Vec<String>> {
    let doomed = select_for_pruning(&backups.list()?, keep);
    for name in &doomed {
        backups.remove(name)?;
        tracing::debug!(backup = %name, "pruned backup");
    }
    Ok(doomed)
}

/// Replace `~/.ssh/config` with the snapshot chosen by `selector`
/// (`latest` or a file name). The current config is snapshotted first.
///
/// # Errors
///
/// Returns an error if the snapshot does not exist or the config cannot be written.
pub fn restore_backup(
    ssh: &impl SshStore,
    backups: &impl BackupStore,
    selector: &str,
    keep: usize,
    now: DateTime<Utc>,
) -> Result<RestoreOutcome> {
    let entries = backups.list()?;
    let restored = resolve_backup(&entries, selector)?.clone();
    let content = backups.read(&restored.name)?;

    // Retention must not delete the snapshot we are about to restore.
    let safety_keep = if keep == 0 { 0 } else { keep.max(2) };
    let safety_backup = create_backup(ssh, backups, safety_keep, now)?;

    ssh.ensure_ssh_dir()?;
    ssh.write_config(&content)?;
    tracing::info!(backup = %restored.name, "restored ssh config");
    Ok(RestoreOutcome {
        restored,
        safety_backup,
    })
}
