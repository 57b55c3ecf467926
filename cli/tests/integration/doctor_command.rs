//! Integration tests for `git-account-manager doctor`.
//!
//! Tool availability differs between machines, so these tests only pin down
//! what the sandboxed `~/.ssh` determines.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crate::sandbox::{Sandbox, json};

fn doctor_json(sandbox: &Sandbox) -> (Option<i32>, serde_json::Value) {
    let output = sandbox
        .cmd()
        .args(["doctor", "--json"])
        .output()
        .expect("run doctor");
    (output.status.code(), json(&output.stdout))
}

#[test]
fn test_doctor_json_shape() {
    let sandbox = Sandbox::new();
    let (code, value) = doctor_json(&sandbox);
    assert!(value["status"] == "healthy" || value["status"] == "unhealthy");
    assert!(value["checks"].is_object());
    assert!(value["issues"].is_array());
    let expected = if value["issues"].as_array().unwrap().is_empty() { 0 } else { 1 };
    assert_eq!(code, Some(expected));
}

#[test]
fn test_doctor_reports_missing_key() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");
    let (code, value) = doctor_json(&sandbox);

    assert_eq!(code, Some(1));
    assert_eq!(value["status"], "unhealthy");
    let issues: Vec<&str> = value["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i.as_str())
        .collect();
    assert!(
        issues.iter().any(|i| i.contains("work")),
        "issues: {issues:?}"
    );
}

#[cfg(unix)]
#[test]
fn test_doctor_flags_loose_config_permissions() {
    use std::os::unix::fs::PermissionsExt;
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config("Host box\n");
    std::fs::set_permissions(
        sandbox.ssh_config_path(),
        std::fs::Permissions::from_mode(0o666),
    )
    .unwrap();

    let (code, value) = doctor_json(&sandbox);
    assert_eq!(code, Some(1));
    assert_eq!(value["status"], "unhealthy");
}
