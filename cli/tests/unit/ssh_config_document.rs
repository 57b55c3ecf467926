//! Managed blocks inside a lived-in `~/.ssh/config`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use git_account_manager::domain::account::{Account, Provider};
use git_account_manager::domain::error::AccountError;
use git_account_manager::domain::remote::rewrite_remote_url;
use git_account_manager::domain::ssh_config::SshConfigDocument;

const HAND_WRITTEN: &str = "\
Include ~/.ssh/config.d/*

# jump host for the lab
Host bastion
    HostName bastion.lab.example
    User ops
    ForwardAgent no

Match host *.internal exec \"test -f ~/.vpn-up\"
    ProxyJump bastion

Host *
    ServerAliveInterval 60
";

fn account(alias: &str, provider: Provider) -> Account {
    Account {
        alias: alias.to_string(),
        name: "Jane Doe".to_string(),
        email: format!("jane@{alias}.example"),
        provider,
        identity_file: format!("~/.ssh/id_ed25519_{alias}"),
    }
}

#[test]
fn test_accounts_coexist_with_hand_written_entries() {
    let mut doc = SshConfigDocument::parse(HAND_WRITTEN).expect("parse");
    assert_eq!(doc.accounts().count(), 0);

    doc.add_account(account("work", Provider::GitHub)).unwrap();
    doc.add_account(account("oss", Provider::GitLab)).unwrap();
    doc.add_account(account("infra", Provider::Custom("git.corp.example".into())))
        .unwrap();

    let rendered = doc.render();
    assert!(rendered.starts_with(HAND_WRITTEN));

    let reparsed = SshConfigDocument::parse(&rendered).expect("reparse");
    let aliases: Vec<&str> = reparsed.accounts().map(|a| a.alias.as_str()).collect();
    assert_eq!(aliases, ["work", "oss", "infra"]);
    assert_eq!(
        reparsed.find("infra").unwrap().host_alias(),
        "git.corp.example-infra"
    );
}

#[test]
fn test_removing_every_account_restores_hand_written_file() {
    let mut doc = SshConfigDocument::parse(HAND_WRITTEN).expect("parse");
    doc.add_account(account("work", Provider::GitHub)).unwrap();
    doc.add_account(account("oss", Provider::GitLab)).unwrap();

    let mut doc = SshConfigDocument::parse(&doc.render()).expect("reparse");
    doc.remove_account("work").unwrap();
    doc.remove_account("oss").unwrap();
    assert_eq!(doc.render(), HAND_WRITTEN);
}

#[test]
fn test_hand_written_host_blocks_managed_alias() {
    let config = format!("{HAND_WRITTEN}\nHost github.com-work\n    HostName github.com\n");
    let mut doc = SshConfigDocument::parse(&config).expect("parse");
    let err = doc
        .add_account(account("work", Provider::GitHub))
        .unwrap_err();
    assert_eq!(err, AccountError::HostAliasTaken("github.com-work".into()));
}

#[test]
fn test_parsed_account_rewrites_its_own_remotes() {
    let mut doc = SshConfigDocument::parse("").expect("parse");
    doc.add_account(account("work", Provider::GitHub)).unwrap();
    let doc = SshConfigDocument::parse(&doc.render()).expect("reparse");
    let work = doc.find("work").unwrap();

    assert_eq!(
        rewrite_remote_url("https://github.com/acme/api.git", work).unwrap(),
        "git@github.com-work:acme/api.git"
    );
    assert!(rewrite_remote_url("git@gitlab.com:acme/api.git", work).is_err());
}
