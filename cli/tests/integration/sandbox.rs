//! Temporary home directory plus a preconfigured command builder.

#![allow(clippy::expect_used, dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct Sandbox {
    home: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("temp home"),
        }
    }

    /// The binary with `$HOME`, the settings file and the environment pinned
    /// to this sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("git-account-manager"));
        cmd.env("HOME", self.home.path())
            .env("GIT_ACCOUNT_MANAGER_CONFIG", self.settings_path())
            .env("NO_COLOR", "1")
            .env_remove("CI")
            .env_remove("GIT_ACCOUNT_MANAGER_YES")
            .env_remove("GIT_ACCOUNT_MANAGER_LOG");
        cmd
    }

    pub fn home(&self) -> PathBuf {
        self.home.path().to_path_buf()
    }

    pub fn ssh_dir(&self) -> PathBuf {
        self.home.path().join(".ssh")
    }

    pub fn ssh_config_path(&self) -> PathBuf {
        self.ssh_dir().join("config")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home.path().join("settings").join("config.yaml")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.ssh_dir().join("backup_git_accounts")
    }

    pub fn read_ssh_config(&self) -> String {
        std::fs::read_to_string(self.ssh_config_path()).expect("read ssh config")
    }

    pub fn write_ssh_config(&self, content: &str) {
        std::fs::create_dir_all(self.ssh_dir()).expect("create .ssh");
        std::fs::write(self.ssh_config_path(), content).expect("write ssh config");
    }

    pub fn backup_names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.backup_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|e| e.file_name().to_str().map(str::to_owned))
            .collect();
        names.sort();
        names
    }

    /// Register `alias` without generating a key.
    pub fn add_account(&self, alias: &str, email: &str) {
        self.cmd()
            .args(["add", alias, "--name", "Jane Doe", "--email", email])
            .args(["--no-keygen", "--yes"])
            .assert()
            .success();
    }
}

pub fn json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout is JSON")
}
