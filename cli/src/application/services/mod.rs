//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod account_service;
pub mod backup_service;
pub mod config_service;
pub mod connection_service;
pub mod doctor_service;
pub mod repo_service;

#[cfg(test)]
pub(crate) mod test_support;
