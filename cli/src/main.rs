//! git-account-manager - manage multiple Git accounts on one machine

#![cfg_attr(test, allow(clippy::expect_used))]

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_account_manager::cli::Cli;
use git_account_manager::output::json::{error_code, format_error};

/// Env var holding a `tracing` filter, e.g. `debug` or `git_account_manager=trace`.
const LOG_ENV: &str = "GIT_ACCOUNT_MANAGER_LOG";

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            if json {
                match format_error(&message, error_code(&e)) {
                    Ok(out) => println!("{out}"),
                    Err(_) => eprintln!("Error: {message}"),
                }
            } else {
                eprintln!("Error: {message}");
            }
            ExitCode::FAILURE
        }
    }
}
