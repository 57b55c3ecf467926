//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// Every event is suppressed when `ctx.quiet`. In JSON mode events go to
/// stderr so stdout stays a single parseable document.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    to_stderr: bool,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            to_stderr: false,
        }
    }

    /// Reporter that writes to stderr, for `--json` runs.
    #[must_use]
    pub fn stderr(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            to_stderr: true,
        }
    }

    fn emit(&self, line: &str) {
        if self.ctx.quiet {
            return;
        }
        if self.to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.emit(&format!("  {} {message}", "→".style(self.ctx.styles.info)));
    }

    fn success(&self, message: &str) {
        self.emit(&format!("  {} {message}", "✓".style(self.ctx.styles.success)));
    }

    fn warn(&self, message: &str) {
        self.emit(&format!("  {} {message}", "!".style(self.ctx.styles.warning)));
    }
}
