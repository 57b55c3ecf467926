//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Account errors ────────────────────────────────────────────────────────────

/// Errors related to account identity and lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account '{0}' not found. Run 'git-account-manager list' to see managed accounts.")]
    NotFound(String),

    #[error("Account '{0}' already exists. Remove it first: git-account-manager remove {0}")]
    AlreadyExists(String),

    #[error(
        "Invalid account alias '{0}': must match ^[a-z0-9]([a-z0-9_-]{{0,30}}[a-z0-9])?$"
    )]
    InvalidAlias(String),

    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Unknown provider '{0}'. Valid providers: github, gitlab, bitbucket, custom:<host>")]
    UnknownProvider(String),

    #[error("Unknown key type '{0}'. Valid key types: ed25519, rsa")]
    UnknownKeyType(String),

    #[error("Host alias '{0}' is already defined in ~/.ssh/config outside of a managed block")]
    HostAliasTaken(String),
}

// ── SSH config errors ─────────────────────────────────────────────────────────

/// Errors raised while parsing managed blocks in `~/.ssh/config`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SshConfigError {
    #[error("line {line}: managed block '{alias}' is never closed")]
    UnclosedBlock { line: usize, alias: String },

    #[error("line {line}: unexpected end marker for '{alias}'")]
    UnexpectedEnd { line: usize, alias: String },

    #[error("line {line}: managed block '{alias}' is missing its '{field}' field")]
    MissingField {
        line: usize,
        alias: String,
        field: &'static str,
    },

    #[error("managed block '{0}' appears more than once")]
    DuplicateBlock(String),
}

// ── Remote URL errors ─────────────────────────────────────────────────────────

/// Errors related to rewriting Git remote URLs onto an account host alias.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RemoteUrlError {
    #[error("Unrecognised remote URL '{0}'. Expected git@host:path, ssh://git@host/path or https://host/path")]
    Unrecognised(String),

    #[error("Remote host '{host}' does not belong to provider '{provider}'")]
    ProviderMismatch { host: String, provider: String },

    #[error("Remote URL '{url}' uses SSH port {port}; managed host aliases only connect on port 22")]
    UnsupportedPort { url: String, port: u16 },
}

// ── Backup errors ─────────────────────────────────────────────────────────────

/// Errors related to SSH config snapshots.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackupError {
    #[error("No backups found in ~/.ssh/backup_git_accounts/")]
    Empty,

    #[error("Backup '{0}' not found. Run 'git-account-manager backup list' to see available backups.")]
    NotFound(String),

    #[error("Invalid backup name '{0}'")]
    InvalidName(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
