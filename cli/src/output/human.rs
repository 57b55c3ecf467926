//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::account_service::{AccountStatus, AddOutcome, RemoveOutcome};
use crate::application::services::backup_service::RestoreOutcome;
use crate::application::services::connection_service::ConnectionReport;
use crate::application::services::repo_service::{CloneOutcome, UseOutcome};
use crate::domain::backup::BackupEntry;
use crate::domain::config::{CONFIG_ENV, ManagerConfig, VALID_CONFIG_KEYS};
use crate::domain::health::{DoctorChecks, GIT_MIN_VERSION};
use crate::domain::ssh_config::render_block;
use crate::output::OutputContext;

/// Subcommands listed by the bare command, in display order.
pub const COMMAND_SUMMARY: &[(&str, &str)] = &[
    ("add <alias>", "Register an account and create its SSH key"),
    ("list", "List managed accounts"),
    ("show <alias>", "Show an account and its SSH block"),
    ("key <alias>", "Print an account's public key"),
    ("remove <alias>", "Remove an account"),
    ("test <alias>", "Test SSH authentication"),
    ("use <alias>", "Use an account in a repository"),
    ("clone <alias> <url>", "Clone a repository as an account"),
    ("backup <command>", "Create, list, restore or prune backups"),
    ("doctor", "Diagnose the SSH setup"),
    ("config <command>", "Show or change settings"),
    ("menu", "Interactive menu"),
];

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Account summary and command list printed under the banner.
    pub fn render_overview(&self, accounts: &[AccountStatus]) {
        if accounts.is_empty() {
            println!("  No accounts configured yet.");
        } else {
            println!("  {}", "Accounts:".style(self.ctx.styles.header));
            for status in accounts {
                println!(
                    "    {:<16} {:<28} {}",
                    status.account.alias.style(self.ctx.styles.alias),
                    status.account.email,
                    status.host_alias.style(self.ctx.styles.dim)
                );
            }
        }
        println!();
        println!("  {}", "Usage: git-account-manager <command>".style(self.ctx.styles.bold));
        println!();
        for (cmd, about) in COMMAND_SUMMARY {
            println!("    {cmd:<22} {about}");
        }
        println!();
        println!("  Run 'git-account-manager <command> --help' for details.");
        println!();
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.info(&format!("git-account-manager v{version}"));
    }

    /// Render managed accounts as a table.
    pub fn render_accounts(&self, accounts: &[AccountStatus]) {
        if accounts.is_empty() {
            if !self.ctx.quiet {
                println!("No accounts configured. Add one: git-account-manager add <alias>");
            }
            return;
        }
        println!(
            "  {:<16} {:<12} {:<28} {:<28} {}",
            "ALIAS".style(self.ctx.styles.dim),
            "PROVIDER".style(self.ctx.styles.dim),
            "EMAIL".style(self.ctx.styles.dim),
            "HOST".style(self.ctx.styles.dim),
            "KEY".style(self.ctx.styles.dim),
        );
        for status in accounts {
            let key = if status.key_present {
                "✓".style(self.ctx.styles.success).to_string()
            } else {
                "missing".style(self.ctx.styles.error).to_string()
            };
            println!(
                "  {:<16} {:<12} {:<28} {:<28} {key}",
                status.account.alias,
                status.account.provider.to_string(),
                status.account.email,
                status.host_alias,
            );
        }
    }

    /// Render one account with its SSH block and a clone hint.
    pub fn render_account(&self, status: &AccountStatus) {
        let account = &status.account;
        println!();
        self.ctx.header(&format!("Account {}", account.alias));
        println!();
        self.ctx.kv("Name:      ", &account.name);
        self.ctx.kv("Email:     ", &account.email);
        self.ctx.kv("Provider:  ", &account.provider.to_string());
        self.ctx.kv("Host alias:", &status.host_alias);
        let key_state = if status.key_present { "" } else { " (missing)" };
        self.ctx.kv("Key:       ", &format!("{}{key_state}", account.identity_file));
        println!();
        for line in render_block(account).lines() {
            println!("    {}", line.style(self.ctx.styles.dim));
        }
        println!();
        println!(
            "  Clone with: git clone git@{}:<owner>/<repo>.git",
            status.host_alias
        );
        println!();
    }

    /// Print a public key bare, so it can be piped to a clipboard tool.
    pub fn render_public_key(&self, key: &str) {
        println!("{key}");
    }

    /// Render the result of `add`.
    pub fn render_added(&self, outcome: &AddOutcome) {
        let account = &outcome.account;
        if let Some(backup) = &outcome.backup {
            self.ctx.info(&format!("previous config saved as {}", backup.name));
        }
        self.ctx
            .success(&format!("account {} added as {}", account.alias, account.host_alias()));
        if self.ctx.quiet {
            return;
        }
        match &outcome.public_key {
            Some(key) => {
                println!();
                println!("  Add this public key to your {} account:", account.provider);
                println!();
                println!("    {key}");
                println!();
                if let Some(url) = account.provider.key_settings_url() {
                    println!("  {}  {url}", "Register it at:".style(self.ctx.styles.bold));
                }
                println!(
                    "  Then verify with: git-account-manager test {}",
                    account.alias
                );
            }
            None => {
                println!(
                    "  Place the key at {} and run: git-account-manager key {}",
                    account.identity_file, account.alias
                );
            }
        }
        println!();
    }

    /// Render the result of `remove`.
    pub fn render_removed(&self, outcome: &RemoveOutcome) {
        if let Some(backup) = &outcome.backup {
            self.ctx.info(&format!("previous config saved as {}", backup.name));
        }
        self.ctx
            .success(&format!("account {} removed", outcome.account.alias));
    }

    /// Render an SSH authentication test.
    pub fn render_connection(&self, report: &ConnectionReport) {
        if report.authenticated {
            self.ctx
                .success(&format!("{} authenticated via {}", report.alias, report.host_alias));
        } else {
            self.ctx
                .error(&format!("{} could not authenticate via {}", report.alias, report.host_alias));
        }
        self.ctx.kv("Response:", &report.message);
    }

    /// Render the result of `use`.
    pub fn render_use(&self, outcome: &UseOutcome) {
        self.ctx
            .success(&format!("{} identity set ({})", outcome.alias, outcome.scope));
        if let Some(change) = &outcome.remote {
            if change.before == change.after {
                self.ctx.info(&format!("{} already uses {}", change.name, change.after));
            } else {
                self.ctx.kv(&format!("{}:", change.name), &change.after);
            }
        }
    }

    /// Render the result of `clone`.
    pub fn render_clone(&self, outcome: &CloneOutcome) {
        self.ctx.success(&format!(
            "cloned {} into {} as {}",
            outcome.url,
            outcome.directory.display(),
            outcome.alias
        ));
    }

    /// Render the snapshot list.
    pub fn render_backups(&self, backups: &[BackupEntry], dir: &Path) {
        if backups.is_empty() {
            if !self.ctx.quiet {
                println!("No backups in {}", dir.display());
            }
            return;
        }
        println!("  {}", format!("Backups ({})", dir.display()).style(self.ctx.styles.header));
        println!();
        for (idx, entry) in backups.iter().enumerate() {
            let marker = if idx == 0 { "  [latest]" } else { "" };
            println!(
                "  {:<32} {}  {:>7} B{marker}",
                entry.name,
                entry.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                entry.size
            );
        }
    }

    /// Render the outcome of `backup create`.
    pub fn render_backup_created(&self, entry: Option<&BackupEntry>) {
        match entry {
            Some(e) => self.ctx.success(&format!("backup written: {}", e.name)),
            None => self
                .ctx
                .info("nothing to back up (no config, or unchanged since the last backup)"),
        }
    }

    /// Render the outcome of `backup restore`.
    pub fn render_restored(&self, outcome: &RestoreOutcome) {
        if let Some(safety) = &outcome.safety_backup {
            self.ctx.info(&format!("current config saved as {}", safety.name));
        }
        self.ctx.success(&format!("restored {}", outcome.restored.name));
    }

    /// Render the outcome of `backup prune`.
    pub fn render_pruned(&self, removed: &[String], keep: usize) {
        if removed.is_empty() {
            self.ctx.info(&format!("nothing to prune (keeping {keep})"));
        } else {
            self.ctx
                .success(&format!("removed {} old backup(s), keeping {keep}", removed.len()));
        }
    }

    pub fn render_config_set(&self, key: &str, value: &str) {
        self.ctx.success(&format!("Set {key} = {value}"));
    }

    /// Render the current settings.
    pub fn render_config(&self, config: &ManagerConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for key in VALID_CONFIG_KEYS {
            let value = config.get(key).unwrap_or_default();
            println!("  {:<22} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, "GIT_ACCOUNT_MANAGER_LOG", "NO_COLOR"] {
            println!(
                "    {:<32} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    /// Render doctor health check results.
    pub fn render_doctor(&self, checks: &DoctorChecks, issues: &[String], verbose: bool) {
        println!();
        println!("  {}", "Git Account Manager Health Check".style(self.ctx.styles.header));
        println!();

        let pre = &checks.prerequisites;
        println!("  Prerequisites:");
        if pre.git_found {
            let ver = pre.git_version.as_deref().unwrap_or("unknown");
            self.print_check(
                pre.git_version_ok,
                &format!("git {ver} (need \u{2265} {GIT_MIN_VERSION})"),
            );
        } else {
            self.print_check(false, "git not found");
        }
        match (pre.ssh_found, pre.ssh_version.as_deref()) {
            (true, Some(ver)) => self.print_check(true, ver),
            (true, None) => self.print_check(true, "ssh"),
            (false, _) => self.print_check(false, "ssh not found"),
        }
        self.print_check(
            pre.ssh_keygen_found,
            if pre.ssh_keygen_found {
                "ssh-keygen"
            } else {
                "ssh-keygen not found"
            },
        );
        if !(pre.git_found && pre.ssh_found && pre.ssh_keygen_found) {
            #[cfg(target_os = "macos")]
            println!("      Install: brew install git openssh");
            #[cfg(not(target_os = "macos"))]
            println!("      Install git and the OpenSSH client with your package manager");
        }
        println!();

        let dir = &checks.ssh_dir;
        println!("  ~/.ssh:");
        if dir.dir_exists {
            self.print_check(
                dir.dir_mode.is_none_or(|m| m & 0o077 == 0),
                &format!("directory{}", mode_suffix(dir.dir_mode)),
            );
        } else {
            self.print_check(true, "directory not created yet");
        }
        if dir.config_exists {
            self.print_check(
                dir.config_mode.is_none_or(|m| m & 0o077 == 0) && dir.config_error.is_none(),
                &format!("config{}", mode_suffix(dir.config_mode)),
            );
        } else {
            self.print_check(true, "config not created yet");
        }
        println!("    {} backup(s)", dir.backup_count);
        println!();

        if !checks.accounts.is_empty() {
            println!("  Accounts:");
            for account in &checks.accounts {
                let ok = account.key_exists && account.key_mode.is_none_or(|m| m & 0o077 == 0);
                self.print_check(
                    ok,
                    &format!(
                        "{} → {}{}",
                        account.alias,
                        account.identity_file,
                        mode_suffix(account.key_mode)
                    ),
                );
            }
            println!();
        }

        if issues.is_empty() {
            println!(
                "  {} Everything looks good!",
                "\u{2713}".style(self.ctx.styles.success)
            );
        } else {
            let hint = if verbose {
                ""
            } else {
                " Run with --verbose for details."
            };
            println!(
                "  {} Found {} issues.{hint}",
                "\u{2717}".style(self.ctx.styles.error),
                issues.len(),
            );
            if verbose {
                println!();
                for issue in issues {
                    println!("    {} {issue}", "\u{2717}".style(self.ctx.styles.error));
                }
            }
        }
        println!();
    }

    fn print_check(&self, ok: bool, msg: &str) {
        if ok {
            println!("    {} {msg}", "\u{2713}".style(self.ctx.styles.success));
        } else {
            println!("    {} {msg}", "\u{2717}".style(self.ctx.styles.error));
        }
    }
}

fn mode_suffix(mode: Option<u32>) -> String {
    mode.map(|m| format!(" (mode {m:o})")).unwrap_or_default()
}
