//! Health check domain types and pure diagnostic functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;

/// Oldest git that honours per-host `IdentityFile` together with
/// `core.sshCommand` and `includeIf`.
pub const GIT_MIN_VERSION: semver::Version = semver::Version::new(2, 13, 0);

// ── Types ─────────────────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct DoctorChecks {
    /// External tools the manager shells out to.
    pub prerequisites: PrerequisiteChecks,
    /// `~/.ssh` and `~/.ssh/config` state.
    pub ssh_dir: SshDirChecks,
    /// One entry per managed account.
    pub accounts: Vec<AccountCheck>,
}

/// Presence and version of git and the OpenSSH client tools.
#[derive(Debug, Serialize)]
#[allow(clippy::struct_field_names, clippy::struct_excessive_bools)]
pub struct PrerequisiteChecks {
    /// Whether `git` is on PATH.
    pub git_found: bool,
    /// Installed git version (e.g. `"2.43.0"`), if found.
    pub git_version: Option<String>,
    /// Whether the installed git meets [`GIT_MIN_VERSION`].
    pub git_version_ok: bool,
    /// Whether `ssh` is on PATH.
    pub ssh_found: bool,
    /// First line of `ssh -V`, e.g. `"OpenSSH_9.6p1 ..."`.
    pub ssh_version: Option<String>,
    /// Whether `ssh-keygen` is on PATH.
    pub ssh_keygen_found: bool,
}

/// `~/.ssh` directory and config file checks.
#[derive(Debug, Default, Serialize)]
pub struct SshDirChecks {
    pub dir_exists: bool,
    /// Permission bits of `~/.ssh` (Unix only).
    pub dir_mode: Option<u32>,
    pub config_exists: bool,
    /// Permission bits of `~/.ssh/config` (Unix only).
    pub config_mode: Option<u32>,
    /// Managed-block parse failure, if any.
    pub config_error: Option<String>,
    /// Managed host aliases also declared by a hand-written `Host` line.
    pub shadowed_host_aliases: Vec<String>,
    /// Number of snapshots in the backup directory.
    pub backup_count: usize,
}

/// Per-account key checks.
#[derive(Debug, Serialize)]
pub struct AccountCheck {
    pub alias: String,
    pub host_alias: String,
    pub identity_file: String,
    pub key_exists: bool,
    /// Permission bits of the private key (Unix only).
    pub key_mode: Option<u32>,
    pub public_key_exists: bool,
}

// ── Pure functions ────────────────────────────────────────────────────────────

/// Extracts the version from `git --version` output
/// (`git version 2.43.0` / `git version 2.39.3 (Apple Git-145)`).
#[must_use]
pub fn parse_git_version(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .next()?
        .strip_prefix("git version ")?
        .split_whitespace()
        .next()
        .map(str::to_owned)
}

/// Whether `version` meets [`GIT_MIN_VERSION`]. Versions with more than
/// three components (`2.45.1.windows.1`) are compared on the first three.
#[must_use]
pub fn git_version_ok(version: &str) -> bool {
    let core: Vec<&str> = version.split('.').take(3).collect();
    let padded = match core.len() {
        1 => format!("{}.0.0", core[0]),
        2 => format!("{}.{}.0", core[0], core[1]),
        _ => core.join("."),
    };
    semver::Version::parse(&padded).is_ok_and(|v| v >= GIT_MIN_VERSION)
}

/// Collect actionable issues from check results.
///
/// Returns a list of human-readable issue strings for any failing checks.
/// A missing `~/.ssh/config` is not an issue: the first `add` creates it.
#[must_use]
pub fn collect_issues(checks: &DoctorChecks) -> Vec<String> {
    let mut issues = Vec::new();
    let pre = &checks.prerequisites;
    if !pre.git_found {
        issues.push("git is not installed".to_string());
    } else if !pre.git_version_ok {
        let ver = pre.git_version.as_deref().unwrap_or("unknown");
        issues.push(format!("git {ver} is too old (need ≥ {GIT_MIN_VERSION})"));
    }
    if !pre.ssh_found {
        issues.push("ssh (OpenSSH client) is not installed".to_string());
    }
    if !pre.ssh_keygen_found {
        issues.push("ssh-keygen is not installed".to_string());
    }

    let dir = &checks.ssh_dir;
    if let Some(mode) = dir.dir_mode
        && mode & 0o077 != 0
    {
        issues.push(format!("~/.ssh has mode {mode:o} (should be 700)"));
    }
    if let Some(mode) = dir.config_mode
        && mode & 0o077 != 0
    {
        issues.push(format!("~/.ssh/config has mode {mode:o} (should be 600)"));
    }
    if let Some(err) = &dir.config_error {
        issues.push(format!("~/.ssh/config cannot be parsed: {err}"));
    }
    for host in &dir.shadowed_host_aliases {
        issues.push(format!(
            "Host {host} is declared outside its managed block; ssh uses whichever comes first"
        ));
    }

    for account in &checks.accounts {
        if !account.key_exists {
            issues.push(format!(
                "{}: identity file {} is missing",
                account.alias, account.identity_file
            ));
            continue;
        }
        if let Some(mode) = account.key_mode
            && mode & 0o077 != 0
        {
            issues.push(format!(
                "{}: identity file {} has mode {mode:o} (should be 600)",
                account.alias, account.identity_file
            ));
        }
    }
    issues
}

// ── Unit tests ───────────────────────────────────────────────────────────────
