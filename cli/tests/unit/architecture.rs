//! Structural tests for layer boundaries.
//!
//! `domain` is pure, `application` talks to the outside world only through
//! ports, and `infra` never renders output.

use std::path::{Path, PathBuf};

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Tracks whether a line sits inside a `#[cfg(test)]` item.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().starts_with("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-test, non-comment lines of every file under `dir` containing any of
/// `needles`, formatted as `path:line: text`.
fn find_violations(dir: &Path, needles: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        let mut tracker = CfgTestTracker::new();
        for (i, line) in content.lines().enumerate() {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            if in_test || trimmed.starts_with("//") {
                continue;
            }
            for needle in needles {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{}: {trimmed}", i + 1));
                }
            }
        }
    }
    violations
}

#[test]
fn domain_is_pure() {
    let violations = find_violations(
        &src_dir().join("domain"),
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "std::fs",
            "std::process",
            "tokio",
            "println!",
        ],
    );
    assert!(
        violations.is_empty(),
        "domain/ must stay free of I/O and outer layers:\n{}",
        violations.join("\n")
    );
}

#[test]
fn application_uses_ports_only() {
    let violations = find_violations(
        &src_dir().join("application"),
        &[
            "crate::infra",
            "crate::commands",
            "crate::output",
            "std::fs::",
            "tokio::process",
            "println!",
        ],
    );
    assert!(
        violations.is_empty(),
        "application/ must reach the outside world through ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = find_violations(
        &src_dir().join("infra"),
        &["crate::commands", "crate::output", "println!", "eprintln!"],
    );
    assert!(
        violations.is_empty(),
        "infra/ must not render output:\n{}",
        violations.join("\n")
    );
}

#[test]
fn commands_render_through_renderer() {
    let violations = find_violations(
        &src_dir().join("commands"),
        &["serde_json::", "json: bool", "if app.is_json()"],
    );
    assert!(
        violations.is_empty(),
        "commands/ must render through app.renderer():\n{}",
        violations.join("\n")
    );
}

#[test]
fn command_runner_is_built_only_in_app_context() {
    let mut violations = Vec::new();
    for dir in ["application", "commands", "domain", "output"] {
        violations.extend(find_violations(
            &src_dir().join(dir),
            &["TokioCommandRunner::"],
        ));
    }
    assert!(
        violations.is_empty(),
        "TokioCommandRunner is constructed in app.rs only:\n{}",
        violations.join("\n")
    );
}
