//! Shared in-memory port doubles for service tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{BackupStore, CommandRunner, ProgressReporter, SshStore};
use crate::domain::backup::BackupEntry;

/// Build an `ExitStatus` from a logical exit code (cross-platform).
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

pub fn output(code: i32, stdout: &str, stderr: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

// ── SshStore ──────────────────────────────────────────────────────────────────

/// `~/.ssh` held in memory. Every file carries a mode.
pub struct MemorySsh {
    home: PathBuf,
    files: Mutex<BTreeMap<PathBuf, (String, u32)>>,
    fail_config_writes: AtomicBool,
}

impl MemorySsh {
    pub fn new(config: Option<&str>) -> Self {
        let ssh = Self {
            home: PathBuf::from("/home/jane"),
            files: Mutex::new(BTreeMap::new()),
            fail_config_writes: AtomicBool::new(false),
        };
        if let Some(c) = config {
            ssh.set_config(c);
        }
        ssh
    }

    pub fn set_config(&self, content: &str) {
        let path = self.config_path();
        self.put(&path, content, 0o600);
    }

    pub fn config(&self) -> Option<String> {
        self.files
            .lock()
            .expect("lock")
            .get(&self.config_path())
            .map(|(c, _)| c.clone())
    }

    /// Make `write_config` fail, like a full disk.
    pub fn fail_config_writes(&self, fail: bool) {
        self.fail_config_writes.store(fail, Ordering::SeqCst);
    }

    pub fn has_file(&self, path: &Path) -> bool {
        self.files.lock().expect("lock").contains_key(path)
    }

    pub fn put(&self, path: &Path, content: &str, mode: u32) {
        self.files
            .lock()
            .expect("lock")
            .insert(path.to_path_buf(), (content.to_string(), mode));
    }
}

impl SshStore for MemorySsh {
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
        Ok(())
    }
    fn read_config(&self) -> Result<Option<String>> {
        Ok(self.config())
    }
    fn write_config(&self, content: &str) -> Result<()> {
        anyhow::ensure!(
            !self.fail_config_writes.load(Ordering::SeqCst),
            "write {}: no space left on device",
            self.config_path().display()
        );
        self.set_config(content);
        Ok(())
    }
    fn exists(&self, path: &Path) -> bool {
        path == self.ssh_dir() || self.files.lock().expect("lock").contains_key(path)
    }
    fn mode(&self, path: &Path) -> Result<Option<u32>> {
        if path == self.ssh_dir() {
            return Ok(Some(0o700));
        }
        Ok(self.files.lock().expect("lock").get(path).map(|(_, m)| *m))
    }
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .expect("lock")
            .get(path)
            .map(|(c, _)| c.clone())
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))
    }
    fn remove_file(&self, path: &Path) -> Result<()> {
        self.files.lock().expect("lock").remove(path);
        Ok(())
    }
}

// ── BackupStore ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryBackups {
    files: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackups {
    pub fn names(&self) -> Vec<String> {
        self.files.lock().expect("lock").keys().cloned().collect()
    }
}

impl BackupStore for MemoryBackups {
    fn dir(&self) -> PathBuf {
        PathBuf::from("/home/jane/.ssh/backup_git_accounts")
    }
    fn list(&self) -> Result<Vec<BackupEntry>> {
        Ok(self
            .files
            .lock()
            .expect("lock")
            .iter()
            .filter_map(|(name, content)| BackupEntry::from_file(name, content.len() as u64))
            .collect())
    }
    fn read(&self, name: &str) -> Result<String> {
        self.files
            .lock()
            .expect("lock")
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no backup {name}"))
    }
    fn write(&self, name: &str, content: &str) -> Result<BackupEntry> {
        self.files
            .lock()
            .expect("lock")
            .insert(name.to_string(), content.to_string());
        BackupEntry::from_file(name, content.len() as u64)
            .ok_or_else(|| anyhow::anyhow!("bad backup name {name}"))
    }
    fn remove(&self, name: &str) -> Result<()> {
        self.files.lock().expect("lock").remove(name);
        Ok(())
    }
}

// ── CommandRunner ─────────────────────────────────────────────────────────────

/// Replies to commands by prefix match on `"program arg arg..."` and records
/// every invocation. Unmatched commands fail to spawn, like a missing binary.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Vec<(String, Output)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    #[must_use]
    pub fn reply(mut self, prefix: &str, out: Output) -> Self {
        self.replies.push((prefix.to_string(), out));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    fn answer(&self, program: &str, args: &[&str]) -> Result<Output> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().expect("lock").push(line.clone());
        self.replies
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, out)| out.clone())
            .ok_or_else(|| anyhow::anyhow!("failed to spawn {program}"))
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.answer(program, args)
    }
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        self.answer(program, args)
    }
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        self.answer(program, args).map(|o| o.status)
    }
}

/// `ssh-keygen` double that writes the key pair named by `-f` into a
/// [`MemorySsh`]. Every other program is missing.
pub struct KeygenRunner<'a> {
    pub ssh: &'a MemorySsh,
}

impl KeygenRunner<'_> {
    fn answer(&self, program: &str, args: &[&str]) -> Result<Output> {
        anyhow::ensure!(program == "ssh-keygen", "failed to spawn {program}");
        let path = args
            .iter()
            .position(|a| *a == "-f")
            .and_then(|i| args.get(i + 1))
            .ok_or_else(|| anyhow::anyhow!("ssh-keygen called without -f"))?;
        self.ssh.put(Path::new(path), "PRIVATE", 0o600);
        self.ssh.put(
            Path::new(&format!("{path}.pub")),
            "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGenerated jane@corp.com",
            0o644,
        );
        Ok(output(0, "", ""))
    }
}

impl CommandRunner for KeygenRunner<'_> {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.answer(program, args)
    }
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        self.answer(program, args)
    }
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        self.answer(program, args).map(|o| o.status)
    }
}

// ── ProgressReporter ──────────────────────────────────────────────────────────

pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
