//! Domain types and validators for tool settings.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::account::{KeyType, Provider};
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "defaults.provider",
    "defaults.key_type",
    "backup.keep",
    "ssh.connect_timeout",
];

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV: &str = "GIT_ACCOUNT_MANAGER_CONFIG";

const MAX_CONNECT_TIMEOUT_SECS: u64 = 300;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level settings stored in `~/.git-account-manager/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ManagerConfig {
    /// Defaults for `add`.
    pub defaults: DefaultsConfig,
    /// Snapshot retention.
    pub backup: BackupConfig,
    /// SSH connection settings.
    pub ssh: SshConfig,
}

/// Defaults applied when `add` is called without explicit flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Provider id: `github` (default), `gitlab`, `bitbucket`, `custom:<host>`.
    pub provider: String,
    /// Key type: `ed25519` (default) or `rsa`.
    pub key_type: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            provider: "github".to_string(),
            key_type: "ed25519".to_string(),
        }
    }
}

/// Backup retention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BackupConfig {
    /// Number of snapshots to keep; `0` keeps all.
    pub keep: usize,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self { keep: 10 }
    }
}

/// SSH connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SshConfig {
    /// Seconds before `test` gives up on the provider handshake.
    pub connect_timeout: u64,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self { connect_timeout: 15 }
    }
}

impl ManagerConfig {
    /// Default provider, falling back to GitHub when the stored id is invalid.
    #[must_use]
    pub fn default_provider(&self) -> Provider {
        self.defaults.provider.parse().unwrap_or(Provider::GitHub)
    }

    /// Default key type, falling back to ed25519 when the stored id is invalid.
    #[must_use]
    pub fn default_key_type(&self) -> KeyType {
        self.defaults.key_type.parse().unwrap_or_default()
    }

    /// Current value for a whitelisted key, for display.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "defaults.provider" => Some(self.defaults.provider.clone()),
            "defaults.key_type" => Some(self.defaults.key_type.clone()),
            "backup.keep" => Some(self.backup.keep.to_string()),
            "ssh.connect_timeout" => Some(self.ssh.connect_timeout.to_string()),
            _ => None,
        }
    }

    /// Check every stored value against the rules `config set` applies.
    ///
    /// # Errors
    ///
    /// Returns the first invalid key/value pair.
    pub fn validate(&self) -> Result<()> {
        for key in VALID_CONFIG_KEYS {
            if let Some(value) = self.get(key) {
                validate_config_value(key, &value)?;
            }
        }
        Ok(())
    }

    /// Validate and assign `value` to `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "defaults.provider" => {
                self.defaults.provider = value.parse::<Provider>()?.to_string();
            }
            "defaults.key_type" => self.defaults.key_type = value.parse::<KeyType>()?.to_string(),
            "backup.keep" => self.backup.keep = value.parse()?,
            "ssh.connect_timeout" => self.ssh.connect_timeout = value.parse()?,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |valid: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    };
    match key {
        "defaults.provider" if value.parse::<Provider>().is_err() => {
            Err(invalid("github, gitlab, bitbucket, custom:<host>").into())
        }
        "defaults.key_type" if value.parse::<KeyType>().is_err() => {
            Err(invalid("ed25519, rsa").into())
        }
        "backup.keep" if value.parse::<usize>().is_err() => {
            Err(invalid("a non-negative integer (0 keeps all backups)").into())
        }
        "ssh.connect_timeout"
            if !value
                .parse::<u64>()
                .is_ok_and(|v| (1..=MAX_CONNECT_TIMEOUT_SECS).contains(&v)) =>
        {
            Err(invalid("an integer between 1 and 300").into())
        }
        _ => Ok(()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
