//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::ManagerConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<ManagerConfig> {
    store.load()
}

/// Validate, assign and persist a single setting. Returns the stored value,
/// which may be normalised (`GitHub` → `github`).
///
/// # Errors
///
/// Returns an error if the key or value is invalid or the file cannot be written.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<String> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    tracing::info!(key, "setting updated");
    Ok(config.get(key).unwrap_or_default())
}
