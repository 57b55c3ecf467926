//! Application service — account add / list / remove use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::application::ports::{BackupStore, CommandRunner, ProgressReporter, SshStore};
use crate::application::services::backup_service;
use crate::domain::account::{
    Account, KeyType, Provider, validate_alias, validate_email, validate_name,
};
use crate::domain::backup::BackupEntry;
use crate::domain::error::AccountError;
use crate::domain::ssh::{expand_home, identity_file_setting, public_key_path, validate_public_key};
use crate::domain::ssh_config::SshConfigDocument;

/// Everything needed to register a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub alias: String,
    pub name: String,
    pub email: String,
    pub provider: Provider,
    pub key_type: KeyType,
    /// Reuse this private key instead of generating one.
    pub existing_key: Option<PathBuf>,
    /// When `false` and no existing key is given, the block is written
    /// without creating a key (the user supplies it later).
    pub generate_key: bool,
}

/// Result of a successful `add`.
#[derive(Debug)]
pub struct AddOutcome {
    pub account: Account,
    /// Public key to register with the provider, if available.
    pub public_key: Option<String>,
    pub key_generated: bool,
    pub backup: Option<BackupEntry>,
}

/// Result of a successful `remove`.
#[derive(Debug)]
pub struct RemoveOutcome {
    pub account: Account,
    pub backup: Option<BackupEntry>,
    /// Key files that were deleted.
    pub deleted_keys: Vec<PathBuf>,
    /// Set when `--delete-key` was requested but the key was not created by
    /// this tool and was left in place.
    pub kept_foreign_key: Option<PathBuf>,
}

/// An account together with what is on disk for it.
#[derive(Debug, Clone, Serialize)]
pub struct AccountStatus {
    #[serde(flatten)]
    pub account: Account,
    pub host_alias: String,
    /// Whether the private key file exists.
    pub key_present: bool,
}

/// Parse `~/.ssh/config`. A missing file is an empty document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a managed block is malformed.
pub fn load_document(ssh: &impl SshStore) -> Result<SshConfigDocument> {
    let content = ssh.read_config()?.unwrap_or_default();
    SshConfigDocument::parse(&content)
        .with_context(|| format!("cannot parse {}", ssh.config_path().display()))
}

/// All managed accounts in file order.
///
/// # Errors
///
/// Returns an error if `~/.ssh/config` cannot be loaded.
pub fn list_accounts(ssh: &impl SshStore) -> Result<Vec<Account>> {
    Ok(load_document(ssh)?.accounts().cloned().collect())
}

/// All managed accounts with key presence, in file order.
///
/// # Errors
///
/// Returns an error if `~/.ssh/config` cannot be loaded.
pub fn account_statuses(ssh: &impl SshStore) -> Result<Vec<AccountStatus>> {
    Ok(list_accounts(ssh)?
        .into_iter()
        .map(|account| status_of(ssh, account))
        .collect())
}

/// Key presence for a single account.
#[must_use]
pub fn status_of(ssh: &impl SshStore, account: Account) -> AccountStatus {
    let key_present = ssh.exists(&identity_path(ssh, &account));
    AccountStatus {
        host_alias: account.host_alias(),
        account,
        key_present,
    }
}

/// Look up one managed account.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the alias is unknown.
pub fn find_account(ssh: &impl SshStore, alias: &str) -> Result<Account> {
    load_document(ssh)?
        .find(alias)
        .cloned()
        .ok_or_else(|| AccountError::NotFound(alias.to_string()).into())
}

/// Absolute path of the account's private key.
#[must_use]
pub fn identity_path(ssh: &impl SshStore, account: &Account) -> PathBuf {
    expand_home(&account.identity_file, ssh.home())
}

/// Read and validate the account's public key.
///
/// # Errors
///
/// Returns an error if the `.pub` file is missing or not a supported key.
pub fn read_public_key(ssh: &impl SshStore, account: &Account) -> Result<String> {
    let path = public_key_path(&identity_path(ssh, account));
    let key = ssh
        .read_to_string(&path)
        .with_context(|| format!("cannot read public key {}", path.display()))?;
    validate_public_key(&key)?;
    Ok(key.trim().to_string())
}

/// Register a new account: validate, create or reuse a key, back up and
/// rewrite `~/.ssh/config`.
///
/// # Errors
///
/// Returns an error on invalid input, a duplicate alias, a key that already
/// exists on disk, `ssh-keygen` failure, or an I/O failure.
pub async fn add_account(
    ssh: &impl SshStore,
    backups: &impl BackupStore,
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    request: NewAccount,
    keep: usize,
) -> Result<AddOutcome> {
    validate_alias(&request.alias)?;
    validate_name(&request.name)?;
    validate_email(&request.email)?;

    let identity_file = match &request.existing_key {
        Some(path) => path.to_string_lossy().into_owned(),
        None => identity_file_setting(&request.key_type.identity_file_name(&request.alias)),
    };
    let account = Account {
        alias: request.alias.clone(),
        name: request.name.trim().to_string(),
        email: request.email.clone(),
        provider: request.provider.clone(),
        identity_file,
    };

    let mut doc = load_document(ssh)?;
    doc.add_account(account.clone())?;

    ssh.ensure_ssh_dir()?;
    let key_path = identity_path(ssh, &account);
    let key_generated = request.existing_key.is_none() && request.generate_key;
    if let Some(existing) = &request.existing_key {
        anyhow::ensure!(
            ssh.exists(existing),
            "identity file {} does not exist",
            existing.display()
        );
    } else if key_generated {
        anyhow::ensure!(
            !ssh.exists(&key_path),
            "identity file {} already exists. Reuse it with --identity-file {}",
            key_path.display(),
            key_path.display()
        );
    } else if !ssh.exists(&key_path) {
        reporter.warn(&format!(
            "no key at {}; create it before using this account",
            key_path.display()
        ));
    }

    let backup = backup_service::create_backup(ssh, backups, keep, Utc::now())?;

    if key_generated {
        reporter.step(&format!("generating {} key...", request.key_type));
        if let Err(e) = generate_key(runner, request.key_type, &account.email, &key_path).await {
            discard_key_pair(ssh, &key_path);
            return Err(e);
        }
        reporter.success(&format!("key created at {}", key_path.display()));
    }

    if let Err(e) = ssh.write_config(&doc.render()) {
        if key_generated {
            discard_key_pair(ssh, &key_path);
        }
        return Err(e);
    }
    tracing::info!(alias = %account.alias, host = %account.host_alias(), "account added");

    let public_key = read_public_key(ssh, &account).ok();
    Ok(AddOutcome {
        account,
        public_key,
        key_generated,
        backup,
    })
}

/// Remove an account's managed block and optionally its generated key pair.
///
/// # Errors
///
/// Returns an error if the alias is unknown or an I/O operation fails.
pub fn remove_account(
    ssh: &impl SshStore,
    backups: &impl BackupStore,
    reporter: &impl ProgressReporter,
    alias: &str,
    delete_key: bool,
    keep: usize,
) -> Result<RemoveOutcome> {
    let mut doc = load_document(ssh)?;
    let account = doc.remove_account(alias)?;

    let backup = backup_service::create_backup(ssh, backups, keep, Utc::now())?;
    ssh.write_config(&doc.render())?;
    tracing::info!(alias = %account.alias, "account removed");

    let mut deleted_keys = Vec::new();
    let mut kept_foreign_key = None;
    if delete_key {
        let key_path = identity_path(ssh, &account);
        if is_generated_key(ssh, &account, &key_path) {
            for path in [public_key_path(&key_path), key_path] {
                if ssh.exists(&path) {
                    ssh.remove_file(&path)?;
                    reporter.success(&format!("deleted {}", path.display()));
                    deleted_keys.push(path);
                }
            }
        } else {
            reporter.warn(&format!(
                "{} was not created by git-account-manager; left in place",
                key_path.display()
            ));
            kept_foreign_key = Some(key_path);
        }
    }

    Ok(RemoveOutcome {
        account,
        backup,
        deleted_keys,
        kept_foreign_key,
    })
}

/// Best-effort removal of a key pair `add` just generated.
fn discard_key_pair(ssh: &impl SshStore, key_path: &Path) {
    for path in [public_key_path(key_path), key_path.to_path_buf()] {
        if ssh.exists(&path)
            && let Err(e) = ssh.remove_file(&path)
        {
            tracing::warn!(path = %path.display(), "cannot remove generated key: {e:#}");
        }
    }
}

/// Only keys at the path `add` would generate are ever deleted.
fn is_generated_key(ssh: &impl SshStore, account: &Account, key_path: &Path) -> bool {
    [KeyType::Ed25519, KeyType::Rsa].into_iter().any(|kt| {
        ssh.ssh_dir().join(kt.identity_file_name(&account.alias)) == key_path
    })
}

async fn generate_key(
    runner: &impl CommandRunner,
    key_type: KeyType,
    email: &str,
    path: &Path,
) -> Result<()> {
    let path_str = path.to_string_lossy().into_owned();
    let mut args: Vec<&str> = key_type.keygen_args().to_vec();
    args.extend(["-C", email, "-f", path_str.as_str(), "-N", "", "-q"]);
    tracing::debug!(?args, "running ssh-keygen");

    let output = runner
        .run("ssh-keygen", &args)
        .await
        .context("ssh-keygen is not installed or not in PATH")?;
    anyhow::ensure!(
        output.status.success(),
        "ssh-keygen failed: {}",
        String::from_utf8_lossy(&output.stderr).trim()
    );
    Ok(())
}
