//! Bare `git-account-manager`: banner, account summary and command list.
//!
//! Exits with status 1 whether or not accounts exist.

use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::account_service;
use crate::output::banner::print_banner;
use crate::output::HumanRenderer;

/// Run the overview. A broken `~/.ssh/config` is reported, not fatal.
#[must_use]
pub fn run(app: &AppContext) -> ExitCode {
    print_banner(&app.output, env!("CARGO_PKG_VERSION"));
    let accounts = match account_service::account_statuses(&app.ssh) {
        Ok(accounts) => accounts,
        Err(e) => {
            app.output.warn(&format!("{e:#}"));
            Vec::new()
        }
    };
    HumanRenderer::new(&app.output).render_overview(&accounts);
    ExitCode::FAILURE
}
