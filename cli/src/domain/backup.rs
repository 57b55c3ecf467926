//! Backup naming, selection and retention for `~/.ssh/backup_git_accounts/`.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::error::BackupError;

/// Timestamp layout embedded in backup file names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Selector accepted by `backup restore` for the newest snapshot.
pub const LATEST: &str = "latest";

static BACKUP_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^config\.(\d{8}-\d{6})(?:-(\d{1,4}))?\.bak$").expect("valid regex")
});

/// One snapshot of `~/.ssh/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupEntry {
    /// File name inside the backup directory.
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Disambiguates snapshots taken within the same second.
    #[serde(skip)]
    pub seq: u32,
    pub size: u64,
}

impl BackupEntry {
    /// Build an entry from a directory listing, ignoring foreign files.
    #[must_use]
    pub fn from_file(name: &str, size: u64) -> Option<Self> {
        let (created_at, seq) = parse_backup_name(name)?;
        Some(Self {
            name: name.to_string(),
            created_at,
            seq,
            size,
        })
    }
}

/// Parses `config.<YYYYmmdd-HHMMSS>[-<n>].bak`.
#[must_use]
pub fn parse_backup_name(name: &str) -> Option<(DateTime<Utc>, u32)> {
    let caps = BACKUP_NAME_RE.captures(name)?;
    let ts = NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), BACKUP_TIMESTAMP_FORMAT).ok()?;
    let seq = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    Some((ts.and_utc(), seq))
}

/// Chooses a file name for a snapshot taken at `now` that does not collide
/// with `existing`.
#[must_use]
pub fn backup_file_name(now: DateTime<Utc>, existing: &[BackupEntry]) -> String {
    let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let base = format!("config.{stamp}.bak");
    if !existing.iter().any(|e| e.name == base) {
        return base;
    }
    let mut seq = 1;
    loop {
        let candidate = format!("config.{stamp}-{seq}.bak");
        if !existing.iter().any(|e| e.name == candidate) {
            return candidate;
        }
        seq += 1;
    }
}

/// Sorts entries newest first.
pub fn sort_newest_first(entries: &mut [BackupEntry]) {
    entries.sort_by(|a, b| (b.created_at, b.seq).cmp(&(a.created_at, a.seq)));
}

/// Names of the entries to delete so that only the newest `keep` remain.
///
/// `keep == 0` disables retention.
#[must_use]
pub fn select_for_pruning(entries: &[BackupEntry], keep: usize) -> Vec<String> {
    if keep == 0 || entries.len() <= keep {
        return Vec::new();
    }
    let mut sorted = entries.to_vec();
    sort_newest_first(&mut sorted);
    sorted.split_off(keep).into_iter().map(|e| e.name).collect()
}

/// Resolves `latest` or an exact backup name.
///
/// # Errors
///
/// Returns an error if there are no backups, the name is malformed, or no
/// backup with that name exists.
pub fn resolve_backup<'a>(
    entries: &'a [BackupEntry],
    selector: &str,
) -> Result<&'a BackupEntry, BackupError> {
    if selector == LATEST {
        return entries
            .iter()
            .max_by_key(|e| (e.created_at, e.seq))
            .ok_or(BackupError::Empty);
    }
    if parse_backup_name(selector).is_none() {
        return Err(BackupError::InvalidName(selector.to_string()));
    }
    entries
        .iter()
        .find(|e| e.name == selector)
        .ok_or_else(|| BackupError::NotFound(selector.to_string()))
}

/// Lowercase hex SHA-256 of `content`.
#[must_use]
pub fn content_digest(content: &[u8]) -> String {
    hex_encode(&Sha256::digest(content))
}

/// Encode bytes as lowercase hex.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}

// ── Unit tests ───────────────────────────────────────────────────────────────
