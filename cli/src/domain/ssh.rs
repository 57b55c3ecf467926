//! Pure SSH helpers — key validation and `IdentityFile` path handling.

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Key types `ssh-keygen` may produce for an account.
const PUBLIC_KEY_PREFIXES: &[&str] = &["ssh-ed25519 ", "ssh-rsa "];

/// Validates that `key` is an ed25519 or RSA public key with non-empty
/// key material.
///
/// # Errors
///
/// Returns an error if the key type is not supported or there is no key
/// material after the prefix.
pub fn validate_public_key(key: &str) -> Result<()> {
    let key = key.trim();
    let material = PUBLIC_KEY_PREFIXES
        .iter()
        .find_map(|prefix| key.strip_prefix(prefix))
        .ok_or_else(|| anyhow::anyhow!("unsupported public key type (got: {key:?})"))?;
    let material = material.split_whitespace().next().unwrap_or_default();
    anyhow::ensure!(!material.is_empty(), "public key has no key material");
    anyhow::ensure!(
        material
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "+/=".contains(c)),
        "public key material is not base64"
    );
    Ok(())
}

/// `IdentityFile` value written to `~/.ssh/config` for a key named `file_name`.
#[must_use]
pub fn identity_file_setting(file_name: &str) -> String {
    format!("~/.ssh/{file_name}")
}

/// Expands a leading `~/` in an `IdentityFile` value against `home`.
#[must_use]
pub fn expand_home(value: &str, home: &Path) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None if value == "~" => home.to_path_buf(),
        None => PathBuf::from(value),
    }
}

/// Path of the public half of an identity file.
#[must_use]
pub fn public_key_path(identity: &Path) -> PathBuf {
    let mut os = identity.as_os_str().to_owned();
    os.push(".pub");
    PathBuf::from(os)
}
