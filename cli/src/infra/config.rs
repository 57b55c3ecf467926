//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::{CONFIG_ENV, ManagerConfig};

/// Settings persisted as YAML, by default in `~/.git-account-manager/config.yaml`.
#[derive(Default)]
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Store backed by an explicit file, bypassing the env override.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<ManagerConfig> {
        let path = self.path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(ManagerConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(ManagerConfig::default());
        }
        let config: ManagerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(config)
    }

    fn save(&self, config: &ManagerConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize settings")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(CONFIG_ENV)
            && !val.is_empty()
        {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".git-account-manager").join("config.yaml"))
    }
}
