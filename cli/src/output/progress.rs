//! Progress indicators using indicatif

#![allow(clippy::expect_used)] // Templates are compile-time constants

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::output::OutputContext;

/// Create a spinner for indeterminate progress such as an SSH handshake.
///
/// Returns a hidden bar when progress should not be drawn (quiet, JSON or
/// no TTY), so callers can use it unconditionally.
#[must_use]
pub fn spinner(ctx: &OutputContext, msg: &str) -> ProgressBar {
    if !ctx.show_progress() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
            .template("  {spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Remove a spinner from the terminal without leaving a line behind.
pub fn finish_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}

/// Finish a spinner with an error message.
pub fn finish_error(pb: &ProgressBar, msg: &str) {
    pb.abandon_with_message(format!("✗ {msg}"));
}
