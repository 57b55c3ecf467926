//! JSON output for `--json`.
//!
//! Every payload is a single pretty-printed object on stdout. Failures use the
//! shape produced by [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::account_service::{AccountStatus, AddOutcome, RemoveOutcome};
use crate::application::services::backup_service::RestoreOutcome;
use crate::application::services::connection_service::ConnectionReport;
use crate::application::services::repo_service::{CloneOutcome, UseOutcome};
use crate::domain::backup::BackupEntry;
use crate::domain::config::ManagerConfig;
use crate::domain::error::{
    AccountError, BackupError, ConfigError, RemoteUrlError, SshConfigError,
};
use crate::domain::health::DoctorChecks;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable code for the `code` field of a JSON error.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<AccountError>() {
        return match e {
            AccountError::NotFound(_) => "NOT_FOUND",
            AccountError::AlreadyExists(_) | AccountError::HostAliasTaken(_) => "ALREADY_EXISTS",
            _ => "INVALID_INPUT",
        };
    }
    if let Some(e) = err.downcast_ref::<BackupError>() {
        return match e {
            BackupError::Empty | BackupError::NotFound(_) => "NOT_FOUND",
            BackupError::InvalidName(_) => "INVALID_INPUT",
        };
    }
    if err.downcast_ref::<ConfigError>().is_some()
        || err.downcast_ref::<RemoteUrlError>().is_some()
    {
        return "INVALID_INPUT";
    }
    if err.downcast_ref::<SshConfigError>().is_some() {
        return "SSH_CONFIG_INVALID";
    }
    "ERROR"
}

/// Machine-readable renderer.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &impl Serialize) -> Result<()> {
        let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// `{"version": "..."}`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }

    /// `{"accounts": [...]}`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_accounts(accounts: &[AccountStatus]) -> Result<()> {
        Self::print(&serde_json::json!({ "accounts": accounts }))
    }

    /// One account with its rendered SSH block.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_account(status: &AccountStatus) -> Result<()> {
        let mut value = serde_json::to_value(status).context("JSON serialization failed")?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "ssh_block".to_string(),
                crate::domain::ssh_config::render_block(&status.account).into(),
            );
        }
        Self::print(&value)
    }

    /// `{"alias": "...", "public_key": "..."}`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_public_key(alias: &str, key: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "alias": alias, "public_key": key }))
    }

    /// Result of `add`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_added(outcome: &AddOutcome) -> Result<()> {
        Self::print(&serde_json::json!({
            "account": outcome.account,
            "host_alias": outcome.account.host_alias(),
            "public_key": outcome.public_key,
            "key_generated": outcome.key_generated,
            "key_settings_url": outcome.account.provider.key_settings_url(),
            "backup": outcome.backup.as_ref().map(|b| &b.name),
        }))
    }

    /// Result of `remove`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_removed(outcome: &RemoveOutcome) -> Result<()> {
        Self::print(&serde_json::json!({
            "removed": outcome.account.alias,
            "backup": outcome.backup.as_ref().map(|b| &b.name),
            "deleted_keys": outcome.deleted_keys,
            "kept_key": outcome.kept_foreign_key,
        }))
    }

    /// Result of `test`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_connection(report: &ConnectionReport) -> Result<()> {
        Self::print(report)
    }

    /// Result of `use`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_use(outcome: &UseOutcome) -> Result<()> {
        Self::print(outcome)
    }

    /// Result of `clone`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_clone(outcome: &CloneOutcome) -> Result<()> {
        Self::print(outcome)
    }

    /// `{"dir": "...", "backups": [...]}`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_backups(backups: &[BackupEntry], dir: &Path) -> Result<()> {
        Self::print(&serde_json::json!({ "dir": dir, "backups": backups }))
    }

    /// `{"created": <entry|null>}`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_backup_created(entry: Option<&BackupEntry>) -> Result<()> {
        Self::print(&serde_json::json!({ "created": entry }))
    }

    /// Result of `backup restore`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_restored(outcome: &RestoreOutcome) -> Result<()> {
        Self::print(&serde_json::json!({
            "restored": outcome.restored.name,
            "safety_backup": outcome.safety_backup.as_ref().map(|b| &b.name),
        }))
    }

    /// Result of `backup prune`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_pruned(removed: &[String], keep: usize) -> Result<()> {
        Self::print(&serde_json::json!({ "removed": removed, "keep": keep }))
    }

    /// Current settings and their file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(config: &ManagerConfig, path: &Path) -> Result<()> {
        Self::print(&serde_json::json!({ "path": path, "config": config }))
    }

    /// `{"key": "...", "value": "..."}`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config_set(key: &str, value: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "key": key, "value": value }))
    }

    /// `{"status": "healthy"|"unhealthy", "checks": {...}, "issues": [...]}`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_doctor(checks: &DoctorChecks, issues: &[String]) -> Result<()> {
        let status = if issues.is_empty() { "healthy" } else { "unhealthy" };
        Self::print(&serde_json::json!({
            "status": status,
            "checks": checks,
            "issues": issues,
        }))
    }
}
