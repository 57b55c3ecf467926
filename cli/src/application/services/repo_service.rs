//! Application service — binding Git repositories to an account.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Git is driven through the injected [`CommandRunner`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::account::Account;
use crate::domain::remote::{parse_remote_url, rewrite_remote_url};

/// Where `use` writes the commit identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityScope {
    /// `git -C <path> config` plus remote rewrite.
    Repo(PathBuf),
    /// `git config --global`; remotes are left alone.
    Global,
}

/// Result of `use`.
#[derive(Debug, Serialize)]
pub struct UseOutcome {
    pub alias: String,
    /// `global` or the repository path.
    pub scope: String,
    pub remote: Option<RemoteChange>,
}

/// A remote URL before and after rewriting.
#[derive(Debug, Serialize)]
pub struct RemoteChange {
    pub name: String,
    pub before: String,
    pub after: String,
}

/// Result of `clone`.
#[derive(Debug, Serialize)]
pub struct CloneOutcome {
    pub alias: String,
    pub url: String,
    pub directory: PathBuf,
}

/// Point a repository (or the global config) at `account`.
///
/// # Errors
///
/// Returns an error if `path` is not a Git work tree, the remote URL belongs
/// to another provider, or a `git` invocation fails.
pub async fn use_account(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    account: &Account,
    scope: &IdentityScope,
    remote_name: &str,
) -> Result<UseOutcome> {
    let remote = match scope {
        IdentityScope::Global => {
            set_identity(runner, &["--global"], account).await?;
            None
        }
        IdentityScope::Repo(path) => {
            let repo = path.to_string_lossy().into_owned();
            let inside = git(runner, &["-C", &repo, "rev-parse", "--is-inside-work-tree"]).await;
            anyhow::ensure!(
                inside.is_ok_and(|out| out.trim() == "true"),
                "{} is not a git repository",
                path.display()
            );

            // Check the remote first so a provider mismatch leaves the repo untouched.
            let change = match git(runner, &["-C", &repo, "remote", "get-url", remote_name]).await {
                Ok(before) => {
                    let after = rewrite_remote_url(&before, account)?;
                    Some(RemoteChange {
                        name: remote_name.to_string(),
                        before,
                        after,
                    })
                }
                Err(_) => {
                    reporter.warn(&format!("no remote named {remote_name}; only identity set"));
                    None
                }
            };

            set_identity(runner, &["-C", &repo], account).await?;
            if let Some(change) = &change
                && change.before != change.after
            {
                git(runner, &["-C", &repo, "remote", "set-url", remote_name, &change.after])
                    .await?;
                reporter.success(&format!("{remote_name} → {}", change.after));
            }
            change
        }
    };

    let scope_label = match scope {
        IdentityScope::Global => "global".to_string(),
        IdentityScope::Repo(path) => path.display().to_string(),
    };
    tracing::info!(alias = %account.alias, scope = %scope_label, "identity applied");
    Ok(UseOutcome {
        alias: account.alias.clone(),
        scope: scope_label,
        remote,
    })
}

/// Clone `url` through `account`'s host alias and set the local identity.
///
/// # Errors
///
/// Returns an error if the URL cannot be rewritten, the target directory
/// exists, `git clone` fails, or the identity cannot be written.
pub async fn clone_repo(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    account: &Account,
    url: &str,
    directory: Option<&Path>,
) -> Result<CloneOutcome> {
    let rewritten = rewrite_remote_url(url, account)?;
    let directory = match directory {
        Some(dir) => dir.to_path_buf(),
        None => default_clone_dir(url)
            .with_context(|| format!("cannot derive a directory name from {url}"))?,
    };
    anyhow::ensure!(
        !directory.exists(),
        "destination {} already exists",
        directory.display()
    );

    let dir_str = directory.to_string_lossy().into_owned();
    reporter.step(&format!("cloning {rewritten}..."));
    let status = runner
        .run_status("git", &["clone", &rewritten, &dir_str])
        .await
        .context("git is not installed or not in PATH")?;
    anyhow::ensure!(status.success(), "git clone failed ({status})");

    set_identity(runner, &["-C", &dir_str], account).await?;
    reporter.success(&format!("cloned into {}", directory.display()));
    tracing::info!(alias = %account.alias, url = %rewritten, "repository cloned");

    Ok(CloneOutcome {
        alias: account.alias.clone(),
        url: rewritten,
        directory,
    })
}

/// Directory `git clone` would pick: last path segment without `.git`.
fn default_clone_dir(url: &str) -> Option<PathBuf> {
    let remote = parse_remote_url(url)?;
    let last = remote.path.trim_end_matches('/').rsplit('/').next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    (!name.is_empty()).then(|| PathBuf::from(name))
}

async fn set_identity(
    runner: &impl CommandRunner,
    prefix: &[&str],
    account: &Account,
) -> Result<()> {
    for (key, value) in [("user.name", &account.name), ("user.email", &account.email)] {
        let mut args: Vec<&str> = prefix.iter().copied().collect();
        if prefix.first() == Some(&"--global") {
            args.insert(0, "config");
        } else {
            args.push("config");
        }
        args.extend([key, value.as_str()]);
        git(runner, &args).await?;
    }
    Ok(())
}

/// Run git, returning trimmed stdout; non-zero exit is an error.
async fn git(runner: &impl CommandRunner, args: &[&str]) -> Result<String> {
    tracing::debug!(?args, "running git");
    let output = runner
        .run("git", args)
        .await
        .context("git is not installed or not in PATH")?;
    anyhow::ensure!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr).trim()
    );
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
