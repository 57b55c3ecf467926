//! Git remote URL parsing and rewriting onto account host aliases.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use crate::domain::account::Account;
use crate::domain::error::RemoteUrlError;

/// Host and repository path extracted from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    pub host: String,
    /// Repository path without a leading slash, e.g. `owner/repo.git`.
    pub path: String,
    /// Explicit SSH port from an `ssh://` URL.
    pub ssh_port: Option<u16>,
}

/// Port OpenSSH uses when a host alias carries no `Port` line.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Parses `git@host:path`, `ssh://[user@]host[:port]/path` and
/// `http(s)://[user@]host[:port]/path`.
#[must_use]
pub fn parse_remote_url(url: &str) -> Option<RemoteUrl> {
    let url = url.trim();
    if let Some((scheme, rest)) = url.split_once("://") {
        if !matches!(scheme, "ssh" | "https" | "http" | "git+ssh") {
            return None;
        }
        let (authority, path) = rest.split_once('/')?;
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
        let (host, port) = match host_port.split_once(':') {
            Some((h, p)) => (h, Some(p.parse::<u16>().ok()?)),
            None => (host_port, None),
        };
        let mut parsed = remote(host, path)?;
        // An http(s) port says nothing about the SSH endpoint.
        if matches!(scheme, "ssh" | "git+ssh") {
            parsed.ssh_port = port;
        }
        return Some(parsed);
    }

    // scp-like syntax: the colon must come before any slash.
    let (authority, path) = url.split_once(':')?;
    if authority.contains('/') {
        return None;
    }
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    remote(host, path)
}

fn remote(host: &str, path: &str) -> Option<RemoteUrl> {
    let path = path.trim_start_matches('/');
    if host.is_empty() || path.is_empty() {
        return None;
    }
    Some(RemoteUrl {
        host: host.to_string(),
        path: path.to_string(),
        ssh_port: None,
    })
}

/// Rewrites `url` so it connects through `account`'s SSH host alias.
///
/// The URL host must be the provider's canonical host or another host alias
/// of the same provider (switching a repo between accounts), compared without
/// case. Managed host aliases have no `Port` line, so an `ssh://` URL on a
/// port other than 22 is refused.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed, points at another provider
/// or needs a non-standard SSH port.
pub fn rewrite_remote_url(url: &str, account: &Account) -> Result<String, RemoteUrlError> {
    let parsed =
        parse_remote_url(url).ok_or_else(|| RemoteUrlError::Unrecognised(url.to_string()))?;
    let provider_host = account.provider.host();
    if !belongs_to_host(&parsed.host, provider_host) {
        return Err(RemoteUrlError::ProviderMismatch {
            host: parsed.host,
            provider: account.provider.to_string(),
        });
    }
    if let Some(port) = parsed.ssh_port
        && port != DEFAULT_SSH_PORT
    {
        return Err(RemoteUrlError::UnsupportedPort {
            url: url.to_string(),
            port,
        });
    }
    Ok(format!("git@{}:{}", account.host_alias(), parsed.path))
}

/// `host` is `provider_host` itself or `<provider_host>-<alias>`, ignoring case.
fn belongs_to_host(host: &str, provider_host: &str) -> bool {
    if host.eq_ignore_ascii_case(provider_host) {
        return true;
    }
    let (Some(head), Some(rest)) = (
        host.get(..provider_host.len()),
        host.get(provider_host.len()..),
    ) else {
        return false;
    };
    head.eq_ignore_ascii_case(provider_host) && rest.len() > 1 && rest.starts_with('-')
}

// ── Unit tests ───────────────────────────────────────────────────────────────
