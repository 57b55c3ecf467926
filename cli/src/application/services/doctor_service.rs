//! Application service — doctor use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::Result;

use crate::application::ports::{BackupStore, CommandRunner, ProgressReporter, SshStore};
use crate::domain::health::{
    AccountCheck, DoctorChecks, PrerequisiteChecks, SshDirChecks, git_version_ok,
    parse_git_version,
};
use crate::domain::ssh::{expand_home, public_key_path};
use crate::domain::ssh_config::SshConfigDocument;

/// Probe prerequisites, `~/.ssh` and every managed account.
///
/// The service never renders anything; the caller turns the checks into
/// output and an exit code.
///
/// # Errors
///
/// Returns an error if file metadata cannot be read.
pub async fn run_doctor(
    runner: &impl CommandRunner,
    ssh: &impl SshStore,
    backups: &impl BackupStore,
    reporter: &impl ProgressReporter,
) -> Result<DoctorChecks> {
    reporter.step("checking prerequisites...");
    let prerequisites = probe_prerequisites(runner).await;

    reporter.step("checking ~/.ssh...");
    let (ssh_dir, document) = probe_ssh_dir(ssh, backups)?;

    reporter.step("checking account keys...");
    let accounts = match &document {
        Some(doc) => probe_accounts(ssh, doc)?,
        None => Vec::new(),
    };

    reporter.success("diagnostics complete");
    Ok(DoctorChecks {
        prerequisites,
        ssh_dir,
        accounts,
    })
}

// ── Internal probes ───────────────────────────────────────────────────────────

async fn probe_prerequisites(runner: &impl CommandRunner) -> PrerequisiteChecks {
    let git = runner.run("git", &["--version"]).await.ok();
    let git_version = git
        .as_ref()
        .and_then(|o| parse_git_version(&String::from_utf8_lossy(&o.stdout)));

    // `ssh -V` writes its banner to stderr.
    let ssh = runner.run("ssh", &["-V"]).await.ok();
    let ssh_version = ssh.as_ref().and_then(|o| {
        let text = String::from_utf8_lossy(&o.stderr);
        let text = if text.trim().is_empty() {
            String::from_utf8_lossy(&o.stdout)
        } else {
            text
        };
        text.split([',', ' ', '\n'])
            .find(|s| !s.is_empty())
            .map(str::to_owned)
    });

    // ssh-keygen has no version flag; spawning it is enough.
    let ssh_keygen_found = runner.run("ssh-keygen", &["-?"]).await.is_ok();

    PrerequisiteChecks {
        git_found: git.is_some(),
        git_version_ok: git_version.as_deref().is_some_and(git_version_ok),
        git_version,
        ssh_found: ssh.is_some(),
        ssh_version,
        ssh_keygen_found,
    }
}

fn probe_ssh_dir(
    ssh: &impl SshStore,
    backups: &impl BackupStore,
) -> Result<(SshDirChecks, Option<SshConfigDocument>)> {
    let dir = ssh.ssh_dir();
    let config_path = ssh.config_path();
    let dir_exists = ssh.exists(&dir);
    let config_exists = ssh.exists(&config_path);

    let mut checks = SshDirChecks {
        dir_exists,
        dir_mode: if dir_exists { ssh.mode(&dir)? } else { None },
        config_exists,
        config_mode: if config_exists {
            ssh.mode(&config_path)?
        } else {
            None
        },
        backup_count: backups.list().map(|b| b.len()).unwrap_or(0),
        ..SshDirChecks::default()
    };

    let content = ssh.read_config()?.unwrap_or_default();
    let document = match SshConfigDocument::parse(&content) {
        Ok(doc) => doc,
        Err(e) => {
            checks.config_error = Some(e.to_string());
            return Ok((checks, None));
        }
    };

    let hand_written = document.unmanaged_host_patterns();
    checks.shadowed_host_aliases = document
        .accounts()
        .map(|a| a.host_alias())
        .filter(|h| hand_written.iter().any(|p| p.eq_ignore_ascii_case(h)))
        .collect();
    Ok((checks, Some(document)))
}

fn probe_accounts(ssh: &impl SshStore, doc: &SshConfigDocument) -> Result<Vec<AccountCheck>> {
    doc.accounts()
        .map(|account| {
            let key = expand_home(&account.identity_file, ssh.home());
            let key_exists = ssh.exists(&key);
            Ok(AccountCheck {
                alias: account.alias.clone(),
                host_alias: account.host_alias(),
                identity_file: account.identity_file.clone(),
                key_exists,
                key_mode: if key_exists { ssh.mode(&key)? } else { None },
                public_key_exists: ssh.exists(&public_key_path(&key)),
            })
        })
        .collect()
}
