//! `git-account-manager menu` — interactive front end over the subcommands.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use dialoguer::{Input, Select};

use crate::app::AppContext;
use crate::application::services::{account_service, backup_service};
use crate::cli::{Command, dispatch};
use crate::commands::add::AddArgs;
use crate::commands::backup::BackupCommand;
use crate::commands::clone::CloneArgs;
use crate::commands::remove::RemoveArgs;
use crate::commands::switch::UseArgs;
use crate::output::banner::print_banner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Add,
    Show,
    Key,
    Test,
    Use,
    Clone,
    Remove,
    BackupCreate,
    BackupList,
    BackupRestore,
    Doctor,
    Quit,
}

const ACTIONS: &[(Action, &str)] = &[
    (Action::List, "List accounts"),
    (Action::Add, "Add an account"),
    (Action::Show, "Show an account"),
    (Action::Key, "Print a public key"),
    (Action::Test, "Test SSH authentication"),
    (Action::Use, "Use an account in a repository"),
    (Action::Clone, "Clone a repository"),
    (Action::Remove, "Remove an account"),
    (Action::BackupCreate, "Back up ~/.ssh/config"),
    (Action::BackupList, "List backups"),
    (Action::BackupRestore, "Restore a backup"),
    (Action::Doctor, "Run diagnostics"),
    (Action::Quit, "Quit"),
];

/// Run the interactive menu until the user quits.
///
/// A failing action is reported and the menu continues.
///
/// # Errors
///
/// Returns an error when prompting is disabled or the terminal prompt fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    anyhow::ensure!(
        !app.non_interactive && !app.is_json(),
        "the menu needs an interactive terminal; use the subcommands instead"
    );
    print_banner(&app.output, env!("CARGO_PKG_VERSION"));

    let labels: Vec<&str> = ACTIONS.iter().map(|(_, label)| *label).collect();
    loop {
        println!();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()
            .context("menu selection")?;
        let action = ACTIONS[idx].0;
        if action == Action::Quit {
            return Ok(ExitCode::SUCCESS);
        }

        let command = match build_command(app, action) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                app.output.error(&format!("{e:#}"));
                continue;
            }
        };
        match dispatch(app, command).await {
            Ok(code) if code == ExitCode::SUCCESS => {}
            Ok(_) => app.output.warn("finished with problems"),
            Err(e) => app.output.error(&format!("{e:#}")),
        }
    }
}

/// Turn a menu choice into a subcommand, prompting for its arguments.
/// `None` means there is nothing to act on.
fn build_command(app: &AppContext, action: Action) -> Result<Option<Command>> {
    let command = match action {
        Action::List => Command::List,
        Action::Doctor => Command::Doctor,
        Action::BackupCreate => Command::Backup(BackupCommand::Create),
        Action::BackupList => Command::Backup(BackupCommand::List),
        Action::Add => {
            let alias: String = Input::new()
                .with_prompt("Alias (e.g. work, personal)")
                .interact_text()?;
            Command::Add(AddArgs {
                alias,
                ..AddArgs::default()
            })
        }
        Action::Show | Action::Key | Action::Test | Action::Remove => {
            let Some(alias) = pick_account(app)? else {
                return Ok(None);
            };
            match action {
                Action::Show => Command::Show { alias },
                Action::Key => Command::Key { alias },
                Action::Test => Command::Test { alias },
                _ => Command::Remove(RemoveArgs {
                    alias,
                    delete_key: false,
                }),
            }
        }
        Action::Use => {
            let Some(alias) = pick_account(app)? else {
                return Ok(None);
            };
            let path: String = Input::new()
                .with_prompt("Repository path")
                .default(".".to_string())
                .interact_text()?;
            Command::Use(UseArgs {
                alias,
                path: PathBuf::from(path),
                global: false,
                remote: "origin".to_string(),
            })
        }
        Action::Clone => {
            let Some(alias) = pick_account(app)? else {
                return Ok(None);
            };
            let url: String = Input::new().with_prompt("Repository URL").interact_text()?;
            Command::Clone(CloneArgs {
                alias,
                url,
                dir: None,
            })
        }
        Action::BackupRestore => {
            let entries = backup_service::list_backups(&app.backups)?;
            if entries.is_empty() {
                app.output.info("No backups yet.");
                return Ok(None);
            }
            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            let idx = Select::new()
                .with_prompt("Restore which backup?")
                .items(&names)
                .default(0)
                .interact()
                .context("backup selection")?;
            Command::Backup(BackupCommand::Restore {
                name: names[idx].to_string(),
            })
        }
        Action::Quit => return Ok(None),
    };
    Ok(Some(command))
}

fn pick_account(app: &AppContext) -> Result<Option<String>> {
    let accounts = account_service::list_accounts(&app.ssh)?;
    if accounts.is_empty() {
        app.output
            .info("No accounts yet. Choose \"Add an account\" first.");
        return Ok(None);
    }
    let labels: Vec<String> = accounts
        .iter()
        .map(|a| format!("{} ({}, {})", a.alias, a.provider, a.email))
        .collect();
    let idx = Select::new()
        .with_prompt("Account")
        .items(&labels)
        .default(0)
        .interact()
        .context("account selection")?;
    Ok(Some(accounts[idx].alias.clone()))
}
