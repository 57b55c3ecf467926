//! Application service — SSH authentication test against the provider.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::CommandRunner;
use crate::domain::account::Account;

/// Outcome of `ssh -T git@<host-alias>`.
#[derive(Debug, Serialize)]
pub struct ConnectionReport {
    pub alias: String,
    pub host_alias: String,
    pub authenticated: bool,
    /// First non-empty line the provider printed, e.g. the greeting.
    pub message: String,
}

/// Try to authenticate as `account`.
///
/// Providers close the session with exit status 1 even on success, so the
/// verdict comes from the greeting text; custom hosts fall back to exit status.
///
/// # Errors
///
/// Returns an error if `ssh` cannot be spawned or does not finish in time.
pub async fn test_connection(
    runner: &impl CommandRunner,
    account: &Account,
    connect_timeout_secs: u64,
) -> Result<ConnectionReport> {
    let host_alias = account.host_alias();
    let target = format!("git@{host_alias}");
    let connect_timeout = format!("ConnectTimeout={connect_timeout_secs}");
    let args = [
        "-T",
        "-o",
        "BatchMode=yes",
        "-o",
        "StrictHostKeyChecking=accept-new",
        "-o",
        connect_timeout.as_str(),
        target.as_str(),
    ];
    tracing::debug!(?args, "testing ssh authentication");

    let deadline = Duration::from_secs(connect_timeout_secs.saturating_add(5));
    let output = runner
        .run_with_timeout("ssh", &args, deadline)
        .await
        .context("ssh is not installed or not in PATH")?;

    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let authenticated = account
        .provider
        .auth_success_marker()
        .map_or(output.status.success(), |marker| combined.contains(marker));
    let message = combined
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("(no output)")
        .to_string();

    tracing::info!(alias = %account.alias, authenticated, "ssh authentication test finished");
    Ok(ConnectionReport {
        alias: account.alias.clone(),
        host_alias,
        authenticated,
        message,
    })
}
