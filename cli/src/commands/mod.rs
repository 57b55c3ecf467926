//! Command implementations

pub mod add;
pub mod backup;
pub mod clone;
pub mod config;
pub mod doctor;
pub mod key;
pub mod list;
pub mod menu;
pub mod overview;
pub mod remove;
pub mod show;
pub mod switch;
pub mod version;

use anyhow::Result;

use crate::app::AppContext;

/// Prompt for a value when it was not given on the command line.
///
/// # Errors
///
/// Returns an error when prompting is disabled or the terminal prompt fails.
pub(crate) fn value_or_prompt(
    app: &AppContext,
    value: Option<String>,
    flag: &str,
    prompt: &str,
) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }
    anyhow::ensure!(
        !app.non_interactive && !app.is_json(),
        "{flag} is required in non-interactive mode"
    );
    let input: String = dialoguer::Input::new().with_prompt(prompt).interact_text()?;
    Ok(input)
}
