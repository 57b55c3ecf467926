//! Startup banner shown by the bare command and the interactive menu.

use owo_colors::OwoColorize as _;

use crate::output::OutputContext;

pub const TITLE: &str = "MULTI GIT ACCOUNT MANAGER";

const INNER_WIDTH: usize = 46;

/// Banner lines without styling.
#[must_use]
pub fn banner_lines(version: &str) -> Vec<String> {
    let rule = "═".repeat(INNER_WIDTH);
    let center = |text: &str| {
        let len = text.chars().count();
        let left = INNER_WIDTH.saturating_sub(len) / 2;
        let right = INNER_WIDTH.saturating_sub(len + left);
        format!("║{}{text}{}║", " ".repeat(left), " ".repeat(right))
    };
    vec![
        format!("╔{rule}╗"),
        center(TITLE),
        center(&format!("git-account-manager v{version}")),
        format!("╚{rule}╝"),
    ]
}

/// Print the banner to stdout. Not affected by `--quiet`.
pub fn print_banner(ctx: &OutputContext, version: &str) {
    println!();
    for line in banner_lines(version) {
        println!("  {}", line.style(ctx.styles.banner));
    }
    println!();
}
