//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod account;
pub mod backup;
pub mod config;
pub mod error;
pub mod health;
pub mod remote;
pub mod ssh;
pub mod ssh_config;

pub use account::{Account, KeyType, Provider, validate_alias, validate_email, validate_name};
pub use backup::BackupEntry;
pub use config::{ManagerConfig, validate_config_key, validate_config_value};
pub use error::{AccountError, BackupError, ConfigError, RemoteUrlError, SshConfigError};
pub use health::{DoctorChecks, collect_issues};
pub use ssh_config::SshConfigDocument;
