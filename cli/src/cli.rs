//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Manage multiple Git accounts (GitHub, GitLab, Bitbucket) on one machine
#[derive(Parser)]
#[command(name = "git-account-manager", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Show details and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register an account and create its SSH key
    Add(commands::add::AddArgs),

    /// List managed accounts
    List,

    /// Show an account and its SSH block
    Show {
        /// Account alias
        alias: String,
    },

    /// Print an account's public key
    Key {
        /// Account alias
        alias: String,
    },

    /// Remove an account
    Remove(commands::remove::RemoveArgs),

    /// Test SSH authentication for an account
    Test {
        /// Account alias
        alias: String,
    },

    /// Use an account in a repository (or globally)
    Use(commands::switch::UseArgs),

    /// Clone a repository as an account
    Clone(commands::clone::CloneArgs),

    /// Manage backups of ~/.ssh/config
    #[command(subcommand)]
    Backup(commands::backup::BackupCommand),

    /// Diagnose the SSH setup
    Doctor,

    /// Manage settings
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Interactive menu
    Menu,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            verbose,
            command,
        } = self;
        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes, verbose },
        };
        let app = AppContext::new(&flags)?;

        let Some(command) = command else {
            return Ok(commands::overview::run(&app));
        };
        dispatch(&app, command).await
    }
}

/// Run one parsed subcommand. Shared with the interactive menu.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn dispatch(app: &AppContext, command: Command) -> Result<ExitCode> {
    match command {
        Command::Add(args) => commands::add::run(app, args).await,
        Command::List => commands::list::run(app),
        Command::Show { alias } => commands::show::run(app, &alias),
        Command::Key { alias } => commands::key::run(app, &alias),
        Command::Remove(args) => commands::remove::run(app, &args),
        Command::Test { alias } => commands::test::run(app, &alias).await,
        Command::Use(args) => commands::switch::run(app, args).await,
        Command::Clone(args) => commands::clone::run(app, args).await,
        Command::Backup(cmd) => commands::backup::run(app, cmd),
        Command::Doctor => commands::doctor::run(app).await,
        Command::Config(cmd) => commands::config::run(app, cmd),
        Command::Menu => Box::pin(commands::menu::run(app)).await,
        Command::Version => commands::version::run(app),
    }
}
