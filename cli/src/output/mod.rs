//! Output formatting module

pub mod banner;
pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::account_service::{AccountStatus, AddOutcome, RemoveOutcome};
use crate::application::services::backup_service::RestoreOutcome;
use crate::application::services::connection_service::ConnectionReport;
use crate::application::services::repo_service::{CloneOutcome, UseOutcome};
use crate::domain::backup::BackupEntry;
use crate::domain::config::ManagerConfig;
use crate::domain::health::DoctorChecks;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether stdout carries a JSON document.
    pub json: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
            json: false,
        }
    }

    /// Mark stdout as reserved for JSON.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet && !self.json
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Renderer selected by `--json`.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_version(version),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn accounts(&self, accounts: &[AccountStatus]) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_accounts(accounts);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_accounts(accounts),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn account(&self, status: &AccountStatus) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_account(status);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_account(status),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn public_key(&self, alias: &str, key: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_public_key(key);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_public_key(alias, key),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn added(&self, outcome: &AddOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_added(outcome);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_added(outcome),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn removed(&self, outcome: &RemoveOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_removed(outcome);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_removed(outcome),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn connection(&self, report: &ConnectionReport) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_connection(report);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_connection(report),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn used(&self, outcome: &UseOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_use(outcome);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_use(outcome),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn cloned(&self, outcome: &CloneOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_clone(outcome);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_clone(outcome),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn backups(&self, backups: &[BackupEntry], dir: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_backups(backups, dir);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_backups(backups, dir),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn backup_created(&self, entry: Option<&BackupEntry>) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_backup_created(entry);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_backup_created(entry),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn restored(&self, outcome: &RestoreOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_restored(outcome);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_restored(outcome),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn pruned(&self, removed: &[String], keep: usize) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_pruned(removed, keep);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_pruned(removed, keep),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn config(&self, config: &ManagerConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_config(config, path),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn config_set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_config_set(key, value);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_config_set(key, value),
        }
    }

    /// # Errors
    ///
    /// JSON serialization failure.
    pub fn doctor(&self, checks: &DoctorChecks, issues: &[String], verbose: bool) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_doctor(checks, issues, verbose);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::render_doctor(checks, issues),
        }
    }
}
