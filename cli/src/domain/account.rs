//! Account domain types and pure validation functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::domain::error::AccountError;

/// Aliases end up in file names (`id_ed25519_<alias>`) and SSH host patterns,
/// so they are restricted to a conservative character set.
pub static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: constant pattern.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]([a-z0-9_-]{0,30}[a-z0-9])?$").expect("valid regex")
});

/// RFC 1123 hostname, used for `custom:<host>` providers.
pub static HOSTNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("valid regex")
});

// ── Provider ──────────────────────────────────────────────────────────────────

/// A Git hosting provider reachable over SSH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    GitLab,
    Bitbucket,
    /// Self-hosted or otherwise unlisted provider, identified by hostname.
    Custom(String),
}

impl Provider {
    /// Canonical SSH hostname for the provider.
    #[must_use]
    pub fn host(&self) -> &str {
        match self {
            Self::GitHub => "github.com",
            Self::GitLab => "gitlab.com",
            Self::Bitbucket => "bitbucket.org",
            Self::Custom(host) => host,
        }
    }

    /// Text the provider prints on a successful `ssh -T` handshake.
    ///
    /// `None` for custom hosts: success is judged by exit status alone.
    #[must_use]
    pub fn auth_success_marker(&self) -> Option<&'static str> {
        match self {
            Self::GitHub => Some("successfully authenticated"),
            Self::GitLab => Some("Welcome to GitLab"),
            Self::Bitbucket => Some("authenticated via ssh key"),
            Self::Custom(_) => None,
        }
    }

    /// Settings page where the user registers a new SSH public key.
    #[must_use]
    pub fn key_settings_url(&self) -> Option<&'static str> {
        match self {
            Self::GitHub => Some("https://github.com/settings/ssh/new"),
            Self::GitLab => Some("https://gitlab.com/-/user_settings/ssh_keys"),
            Self::Bitbucket => Some("https://bitbucket.org/account/settings/ssh-keys/"),
            Self::Custom(_) => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => f.write_str("github"),
            Self::GitLab => f.write_str("gitlab"),
            Self::Bitbucket => f.write_str("bitbucket"),
            Self::Custom(host) => write!(f, "custom:{host}"),
        }
    }
}

impl FromStr for Provider {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "github" | "github.com" => Ok(Self::GitHub),
            "gitlab" | "gitlab.com" => Ok(Self::GitLab),
            "bitbucket" | "bitbucket.org" => Ok(Self::Bitbucket),
            other => match other.strip_prefix("custom:") {
                Some(host) if HOSTNAME_RE.is_match(host) => Ok(Self::Custom(host.to_string())),
                _ => Err(AccountError::UnknownProvider(s.to_string())),
            },
        }
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Key type ──────────────────────────────────────────────────────────────────

/// SSH key algorithm used when generating a new account key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyType {
    #[default]
    Ed25519,
    Rsa,
}

impl KeyType {
    /// Arguments passed to `ssh-keygen` to select this algorithm.
    #[must_use]
    pub fn keygen_args(self) -> &'static [&'static str] {
        match self {
            Self::Ed25519 => &["-t", "ed25519"],
            Self::Rsa => &["-t", "rsa", "-b", "4096"],
        }
    }

    /// Identity file name for `alias`, e.g. `id_ed25519_work`.
    #[must_use]
    pub fn identity_file_name(self, alias: &str) -> String {
        format!("id_{self}_{alias}")
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519 => f.write_str("ed25519"),
            Self::Rsa => f.write_str("rsa"),
        }
    }
}

impl FromStr for KeyType {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            "rsa" => Ok(Self::Rsa),
            _ => Err(AccountError::UnknownKeyType(s.to_string())),
        }
    }
}

// ── Account ───────────────────────────────────────────────────────────────────

/// One Git identity bound to a provider through its own SSH key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Short unique name, e.g. `work` or `personal`.
    pub alias: String,
    /// Value written to `user.name`.
    pub name: String,
    /// Value written to `user.email` and used as the key comment.
    pub email: String,
    pub provider: Provider,
    /// `IdentityFile` value as written in `~/.ssh/config` (may start with `~/`).
    pub identity_file: String,
}

impl Account {
    /// SSH `Host` pattern for this account, e.g. `github.com-work`.
    #[must_use]
    pub fn host_alias(&self) -> String {
        host_alias(&self.provider, &self.alias)
    }
}

/// Builds the SSH host alias for `alias` on `provider`.
#[must_use]
pub fn host_alias(provider: &Provider, alias: &str) -> String {
    format!("{}-{alias}", provider.host())
}

// ── Validators ────────────────────────────────────────────────────────────────

/// Validates an account alias.
///
/// # Errors
///
/// Returns an error if the alias does not match [`ALIAS_RE`].
pub fn validate_alias(alias: &str) -> Result<()> {
    if !ALIAS_RE.is_match(alias) {
        return Err(AccountError::InvalidAlias(alias.to_string()).into());
    }
    Ok(())
}

/// Validates an email address: one `@`, non-empty local part and a dotted
/// domain, no whitespace.
///
/// # Errors
///
/// Returns an error if the address is malformed.
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || AccountError::InvalidEmail(email.to_string());
    if email.chars().any(char::is_whitespace) {
        return Err(invalid().into());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid().into());
    };
    if local.is_empty() || domain.contains('@') || !HOSTNAME_RE.is_match(domain) {
        return Err(invalid().into());
    }
    if !domain.contains('.') {
        return Err(invalid().into());
    }
    Ok(())
}

/// Validates a display name. Names are stored in a comment line, so they
/// must be single-line.
///
/// # Errors
///
/// Returns an error if the name is blank or contains control characters.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AccountError::InvalidName("name must not be empty".to_string()).into());
    }
    if name.chars().any(char::is_control) {
        return Err(
            AccountError::InvalidName("name must not contain control characters".to_string())
                .into(),
        );
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
