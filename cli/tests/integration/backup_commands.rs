//! `backup create|list|restore|prune` against a sandboxed `~/.ssh`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;

use crate::sandbox::{Sandbox, json};

const ORIGINAL: &str = "Host build-box\n    HostName 10.0.0.7\n";

fn list_json(sandbox: &Sandbox) -> serde_json::Value {
    let out = sandbox
        .cmd()
        .args(["backup", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    json(&out)
}

#[test]
fn test_create_without_config_is_noop() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to back up"));
    assert!(sandbox.backup_names().is_empty());
}

#[test]
fn test_create_writes_snapshot_once_per_change() {
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config(ORIGINAL);

    let out = sandbox
        .cmd()
        .args(["backup", "create", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let created = json(&out);
    let name = created["created"]["name"].as_str().expect("name").to_string();
    assert!(name.starts_with("config.") && name.ends_with(".bak"), "got {name}");

    let out = sandbox
        .cmd()
        .args(["backup", "create", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(json(&out)["created"].is_null(), "unchanged config is not re-saved");

    let snapshot = std::fs::read_to_string(sandbox.backup_dir().join(&name)).unwrap();
    assert_eq!(snapshot, ORIGINAL);
}

#[cfg(unix)]
#[test]
fn test_snapshots_are_private() {
    use std::os::unix::fs::PermissionsExt;
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config(ORIGINAL);
    sandbox.cmd().args(["backup", "create"]).assert().success();

    let dir_mode = std::fs::metadata(sandbox.backup_dir()).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);
    let name = &sandbox.backup_names()[0];
    let file_mode = std::fs::metadata(sandbox.backup_dir().join(name))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(file_mode & 0o777, 0o600);
}

#[test]
fn test_list_newest_first() {
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config(ORIGINAL);
    sandbox.cmd().args(["backup", "create"]).assert().success();
    sandbox.write_ssh_config("Host other\n");
    sandbox.cmd().args(["backup", "create"]).assert().success();

    let value = list_json(&sandbox);
    let backups = value["backups"].as_array().expect("backups");
    assert_eq!(backups.len(), 2);
    let newest = backups[0]["name"].as_str().unwrap().to_string();
    let snapshot = std::fs::read_to_string(sandbox.backup_dir().join(newest)).unwrap();
    assert_eq!(snapshot, "Host other\n");
}

#[test]
fn test_restore_latest_brings_back_previous_config() {
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config(ORIGINAL);
    sandbox.add_account("work", "jane@work.example");
    assert!(sandbox.read_ssh_config().contains("github.com-work"));

    sandbox
        .cmd()
        .args(["backup", "restore", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("restored"));

    assert_eq!(sandbox.read_ssh_config(), ORIGINAL);
    // The config that was replaced is kept as well.
    assert_eq!(sandbox.backup_names().len(), 2);
}

#[test]
fn test_restore_unknown_snapshot_fails() {
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config(ORIGINAL);
    sandbox.cmd().args(["backup", "create"]).assert().success();

    let out = sandbox
        .cmd()
        .args(["backup", "restore", "config.20000101-000000.bak", "--yes", "--json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    assert_eq!(json(&out)["code"], "NOT_FOUND");
    assert_eq!(sandbox.read_ssh_config(), ORIGINAL);
}

#[test]
fn test_restore_rejects_path_traversal() {
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config(ORIGINAL);
    sandbox
        .cmd()
        .args(["backup", "restore", "../config", "--yes"])
        .assert()
        .failure();
    assert_eq!(sandbox.read_ssh_config(), ORIGINAL);
}

#[test]
fn test_restore_without_backups_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["backup", "restore", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No backups found"));
}

#[test]
fn test_prune_keeps_newest() {
    let sandbox = Sandbox::new();
    for i in 0..3 {
        sandbox.write_ssh_config(&format!("Host box{i}\n"));
        sandbox.cmd().args(["backup", "create"]).assert().success();
    }
    assert_eq!(sandbox.backup_names().len(), 3);

    sandbox
        .cmd()
        .args(["backup", "prune", "--keep", "1"])
        .assert()
        .success();

    let remaining = sandbox.backup_names();
    assert_eq!(remaining.len(), 1);
    let snapshot = std::fs::read_to_string(sandbox.backup_dir().join(&remaining[0])).unwrap();
    assert_eq!(snapshot, "Host box2\n");
}

#[test]
fn test_retention_setting_applies_on_create() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "set", "backup.keep", "2"])
        .assert()
        .success();
    for i in 0..4 {
        sandbox.write_ssh_config(&format!("Host box{i}\n"));
        sandbox.cmd().args(["backup", "create"]).assert().success();
    }
    assert_eq!(sandbox.backup_names().len(), 2);
}
