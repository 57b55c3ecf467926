//! Infrastructure implementation of the `SshStore` port over the real `~/.ssh`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::SshStore;
use crate::infra::fs::{atomic_write, ensure_private_dir, file_mode};

/// `~/.ssh` on the local filesystem.
pub struct FsSshStore {
    home: PathBuf,
}

impl FsSshStore {
    /// Store rooted at the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_home(home))
    }

    /// Store rooted at an arbitrary home directory (for testing).
    #[must_use]
    pub fn with_home(home: PathBuf) -> Self {
        Self { home }
    }
}

impl SshStore for FsSshStore {
    fn home(&self) -> &Path {
        &self.home
    }

    fn ssh_dir(&self) -> PathBuf {
        self.home.join(".ssh")
    }

    fn config_path(&self) -> PathBuf {
        self.ssh_dir().join("config")
    }

    fn ensure_ssh_dir(&self) -> Result<()> {
        ensure_private_dir(&self.ssh_dir())
    }

    fn read_config(&self) -> Result<Option<String>> {
        let path = self.config_path();
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn write_config(&self, content: &str) -> Result<()> {
        self.ensure_ssh_dir()?;
        let path = self.config_path();
        // Edit the target of a symlinked config (dotfile managers) in place.
        let target = std::fs::canonicalize(&path).unwrap_or(path);
        atomic_write(&target, content)?;
        tracing::debug!(path = %target.display(), bytes = content.len(), "wrote ssh config");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn mode(&self, path: &Path) -> Result<Option<u32>> {
        file_mode(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
        }
        Ok(())
    }
}
