//! Infrastructure implementation of the `BackupStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::BackupStore;
use crate::domain::backup::{BackupEntry, parse_backup_name};
use crate::domain::error::BackupError;
use crate::infra::fs::{atomic_write, ensure_private_dir};

/// Directory name under `~/.ssh`.
pub const BACKUP_DIR_NAME: &str = "backup_git_accounts";

/// Snapshots in `~/.ssh/backup_git_accounts/`.
pub struct FsBackupStore {
    dir: PathBuf,
}

impl FsBackupStore {
    /// Store inside the given `~/.ssh` directory.
    #[must_use]
    pub fn in_ssh_dir(ssh_dir: &std::path::Path) -> Self {
        Self {
            dir: ssh_dir.join(BACKUP_DIR_NAME),
        }
    }

    /// Resolve a snapshot name, refusing anything that is not a plain
    /// snapshot file name.
    fn path_of(&self, name: &str) -> Result<PathBuf> {
        if parse_backup_name(name).is_none() {
            return Err(BackupError::InvalidName(name.to_string()).into());
        }
        Ok(self.dir.join(name))
    }
}

impl BackupStore for FsBackupStore {
    fn dir(&self) -> PathBuf {
        self.dir.clone()
    }

    fn list(&self) -> Result<Vec<BackupEntry>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).with_context(|| format!("read {}", self.dir.display())),
        };
        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("read {}", self.dir.display()))?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            if let Some(backup) = BackupEntry::from_file(&name, meta.len()) {
                out.push(backup);
            }
        }
        Ok(out)
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.path_of(name)?;
        if !path.exists() {
            return Err(BackupError::NotFound(name.to_string()).into());
        }
        std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    fn write(&self, name: &str, content: &str) -> Result<BackupEntry> {
        let path = self.path_of(name)?;
        ensure_private_dir(&self.dir)?;
        atomic_write(&path, content)?;
        BackupEntry::from_file(name, content.len() as u64)
            .ok_or_else(|| BackupError::InvalidName(name.to_string()).into())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let path = self.path_of(name)?;
        std::fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))
    }
}
