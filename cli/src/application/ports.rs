//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::backup::BackupEntry;
use crate::domain::config::ManagerConfig;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<std::process::ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Settings Port ─────────────────────────────────────────────────────────────

/// Abstracts persistence of tool settings.
pub trait ConfigStore {
    /// Load settings, returning defaults when no file exists.
    fn load(&self) -> Result<ManagerConfig>;
    /// Persist settings.
    fn save(&self, config: &ManagerConfig) -> Result<()>;
    /// Location of the settings file.
    fn path(&self) -> Result<PathBuf>;
}

// ── SSH Directory Port ────────────────────────────────────────────────────────

/// Abstracts `~/.ssh`: the client config file and account key files.
pub trait SshStore {
    /// The user's home directory, used to expand `~/` in `IdentityFile`.
    fn home(&self) -> &Path;
    /// `~/.ssh`.
    fn ssh_dir(&self) -> PathBuf;
    /// `~/.ssh/config`.
    fn config_path(&self) -> PathBuf;
    /// Create `~/.ssh` with mode 700 if it does not exist.
    fn ensure_ssh_dir(&self) -> Result<()>;
    /// Read `~/.ssh/config`, `None` when the file does not exist.
    fn read_config(&self) -> Result<Option<String>>;
    /// Atomically replace `~/.ssh/config` and set mode 600.
    fn write_config(&self, content: &str) -> Result<()>;
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Permission bits of `path`, `None` on platforms without Unix modes.
    fn mode(&self, path: &Path) -> Result<Option<u32>>;
    /// Read a text file such as a public key.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Remove a file if it exists.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

// ── Backup Port ───────────────────────────────────────────────────────────────

/// Abstracts the snapshot directory `~/.ssh/backup_git_accounts/`.
pub trait BackupStore {
    /// Directory holding the snapshots.
    fn dir(&self) -> PathBuf;
    /// Every recognised snapshot, in no particular order.
    fn list(&self) -> Result<Vec<BackupEntry>>;
    /// Snapshot contents.
    fn read(&self, name: &str) -> Result<String>;
    /// Write a new snapshot with mode 600, creating the directory (mode 700).
    fn write(&self, name: &str, content: &str) -> Result<BackupEntry>;
    /// Delete a snapshot.
    fn remove(&self, name: &str) -> Result<()>;
}
