//! Integration tests for git-account-manager
//!
//! These tests spawn the actual binary against a temporary `$HOME`, so they
//! never touch the real `~/.ssh`.

mod account_commands;
mod backup_commands;
mod doctor_command;
mod sandbox;
