//! `git-account-manager doctor` — diagnose prerequisites, `~/.ssh` and keys.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::doctor_service;
use crate::domain::health::collect_issues;

/// Run the doctor command. Exits 1 when any issue is found.
///
/// # Errors
///
/// Returns an error if file metadata cannot be read.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let checks =
        doctor_service::run_doctor(&app.runner, &app.ssh, &app.backups, &app.reporter()).await?;
    let issues = collect_issues(&checks);
    tracing::debug!(issues = issues.len(), "doctor finished");

    app.renderer().doctor(&checks, &issues, app.verbose)?;
    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
