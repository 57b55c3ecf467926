//! `add`, `list`, `show`, `key`, `remove` and `use` against a sandboxed `~/.ssh`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;

use crate::sandbox::{Sandbox, json};

const PUBLIC_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGJ3qBmHkWHnr0F2C1R4Dq7S0e9o5e3b4m1B6cJ8dXyZ jane@work.example";

#[test]
fn test_add_writes_managed_block() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");

    let config = sandbox.read_ssh_config();
    assert!(config.contains("# >>> git-account-manager: work >>>"));
    assert!(config.contains("# <<< git-account-manager: work <<<"));
    assert!(config.contains("Host github.com-work"));
    assert!(config.contains("HostName github.com"));
    assert!(config.contains("IdentityFile ~/.ssh/id_ed25519_work"));
    assert!(config.contains("IdentitiesOnly yes"));
    assert!(config.contains("# email: jane@work.example"));
}

#[test]
fn test_add_keeps_existing_entries() {
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config("Host build-box\n    HostName 10.0.0.7\n    User ci\n");
    sandbox.add_account("work", "jane@work.example");

    let config = sandbox.read_ssh_config();
    assert!(config.starts_with("Host build-box\n    HostName 10.0.0.7\n    User ci\n"));
    assert!(config.contains("Host github.com-work"));
    assert_eq!(sandbox.backup_names().len(), 1, "previous config was backed up");
}

#[test]
fn test_add_uses_requested_provider() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "oss", "--name", "Jane Doe", "--email", "jane@oss.example"])
        .args(["--provider", "gitlab", "--no-keygen", "--yes"])
        .assert()
        .success();
    assert!(sandbox.read_ssh_config().contains("Host gitlab.com-oss"));
}

#[test]
fn test_add_requires_name_when_non_interactive() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "work", "--email", "jane@work.example", "--no-keygen", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name is required"));
    assert!(!sandbox.ssh_config_path().exists());
}

#[test]
fn test_add_rejects_invalid_alias() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "Work Laptop", "--name", "Jane", "--email", "jane@work.example"])
        .args(["--no-keygen", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid account alias"));
}

#[test]
fn test_add_rejects_invalid_email() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "work", "--name", "Jane", "--email", "not-an-email"])
        .args(["--no-keygen", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email address"));
}

#[test]
fn test_add_duplicate_alias_fails_with_json_code() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");
    let before = sandbox.read_ssh_config();

    let out = sandbox
        .cmd()
        .args(["add", "work", "--name", "Jane", "--email", "jane@other.example"])
        .args(["--no-keygen", "--yes", "--json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let value = json(&out);
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "ALREADY_EXISTS");
    assert_eq!(sandbox.read_ssh_config(), before, "config untouched");
}

#[test]
fn test_add_with_existing_identity_file_reports_public_key() {
    let sandbox = Sandbox::new();
    let keys = sandbox.home().join("keys");
    std::fs::create_dir_all(&keys).unwrap();
    std::fs::write(keys.join("work_key"), "PRIVATE").unwrap();
    std::fs::write(keys.join("work_key.pub"), format!("{PUBLIC_KEY}\n")).unwrap();

    let out = sandbox
        .cmd()
        .args(["add", "work", "--name", "Jane Doe", "--email", "jane@work.example"])
        .arg("--identity-file")
        .arg(keys.join("work_key"))
        .args(["--yes", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value = json(&out);
    assert_eq!(value["public_key"], PUBLIC_KEY);
    assert_eq!(value["key_generated"], false);
    assert_eq!(value["host_alias"], "github.com-work");

    sandbox
        .cmd()
        .args(["key", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains(PUBLIC_KEY));
}

#[test]
fn test_list_json_reports_accounts() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");
    sandbox.add_account("personal", "jane@home.example");

    let out = sandbox
        .cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value = json(&out);
    let accounts = value["accounts"].as_array().expect("accounts array");
    assert_eq!(accounts.len(), 2);
    let work = accounts
        .iter()
        .find(|a| a["alias"] == "work")
        .expect("work listed");
    assert_eq!(work["host_alias"], "github.com-work");
    assert_eq!(work["email"], "jane@work.example");
    assert_eq!(work["key_present"], false);
}

#[test]
fn test_list_empty() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No accounts configured"));
}

#[test]
fn test_show_prints_ssh_block() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");
    let out = sandbox
        .cmd()
        .args(["show", "work", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value = json(&out);
    assert_eq!(value["alias"], "work");
    assert!(
        value["ssh_block"]
            .as_str()
            .unwrap()
            .contains("Host github.com-work")
    );
}

#[test]
fn test_show_unknown_alias_is_not_found() {
    let sandbox = Sandbox::new();
    let out = sandbox
        .cmd()
        .args(["show", "ghost", "--json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    assert_eq!(json(&out)["code"], "NOT_FOUND");
}

#[test]
fn test_key_missing_fails() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");
    sandbox.cmd().args(["key", "work"]).assert().failure();
}

#[test]
fn test_remove_deletes_block_and_backs_up() {
    let sandbox = Sandbox::new();
    sandbox.write_ssh_config("Host build-box\n    HostName 10.0.0.7\n");
    sandbox.add_account("work", "jane@work.example");
    sandbox.add_account("personal", "jane@home.example");

    sandbox
        .cmd()
        .args(["remove", "work", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("account work removed"));

    let config = sandbox.read_ssh_config();
    assert!(!config.contains("github.com-work"));
    assert!(config.contains("Host github.com-personal"));
    assert!(config.contains("Host build-box"));
    assert_eq!(sandbox.backup_names().len(), 3);
}

#[test]
fn test_remove_delete_key_removes_generated_pair() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");
    let private = sandbox.ssh_dir().join("id_ed25519_work");
    let public = sandbox.ssh_dir().join("id_ed25519_work.pub");
    std::fs::write(&private, "PRIVATE").unwrap();
    std::fs::write(&public, PUBLIC_KEY).unwrap();

    sandbox
        .cmd()
        .args(["remove", "work", "--delete-key", "--yes"])
        .assert()
        .success();
    assert!(!private.exists());
    assert!(!public.exists());
}

#[test]
fn test_remove_unknown_alias_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["remove", "ghost", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account 'ghost' not found"));
}

#[test]
fn test_use_outside_repository_fails() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");
    let not_a_repo = sandbox.home().join("plain-dir");
    std::fs::create_dir_all(&not_a_repo).unwrap();

    sandbox
        .cmd()
        .args(["use", "work", "--path"])
        .arg(&not_a_repo)
        .env("GIT_CEILING_DIRECTORIES", sandbox.home())
        .assert()
        .failure();
}

#[test]
fn test_clone_rejects_other_provider_url() {
    let sandbox = Sandbox::new();
    sandbox.add_account("work", "jane@work.example");
    sandbox
        .cmd()
        .args(["clone", "work", "git@gitlab.com:acme/app.git"])
        .current_dir(sandbox.home())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not belong to provider"));
}
