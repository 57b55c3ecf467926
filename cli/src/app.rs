//! Application context — unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()` from the global flags. Adding a new
//! cross-cutting concern requires only one field change here.

use anyhow::Result;

use crate::application::ports::{ConfigStore, SshStore};
use crate::domain::config::ManagerConfig;
use crate::infra::backup::FsBackupStore;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::ssh::FsSshStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Env vars that switch off interactive prompts.
pub const NON_INTERACTIVE_ENV: &[&str] = &["CI", "GIT_ACCOUNT_MANAGER_YES"];

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `GIT_ACCOUNT_MANAGER_YES`).
    pub yes: bool,
    /// Extra detail in human output.
    pub verbose: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// `~/.ssh` access.
    pub ssh: FsSshStore,
    /// `~/.ssh/backup_git_accounts/`.
    pub backups: FsBackupStore,
    /// Settings file.
    pub config_store: YamlConfigStore,
    /// Settings loaded at startup.
    pub config: ManagerConfig,
    /// `git`, `ssh` and `ssh-keygen` execution.
    pub runner: TokioCommandRunner,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
    /// `--verbose` was passed.
    pub verbose: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = NON_INTERACTIVE_ENV
            .iter()
            .any(|var| std::env::var_os(var).is_some());
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let ssh = FsSshStore::new()?;
        let backups = FsBackupStore::in_ssh_dir(&ssh.ssh_dir());
        let config_store = YamlConfigStore::default();
        // Unparseable settings fall back to defaults; `config show` still reports them.
        let config = config_store.load().unwrap_or_else(|e| {
            tracing::warn!("{e:#}; using default settings");
            ManagerConfig::default()
        });
        tracing::debug!(home = %ssh.home().display(), non_interactive, "context ready");

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet)
                .with_json(flags.output.json),
            mode,
            ssh,
            backups,
            config_store,
            config,
            runner: TokioCommandRunner::default(),
            non_interactive,
            verbose: flags.behaviour.verbose,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter for services; stays off stdout in JSON mode.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        if self.is_json() {
            TerminalReporter::stderr(&self.output)
        } else {
            TerminalReporter::new(&self.output)
        }
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or
    /// `GIT_ACCOUNT_MANAGER_YES` env), returns `default` immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
