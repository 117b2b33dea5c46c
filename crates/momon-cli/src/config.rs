//! Configuration management for Momon CLI
//!
//! Stores the server URL and this machine's device id in
//! ~/.config/momon/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const CONFIG_DIR: &str = "momon";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Pseudonymous identity sent as X-Device-ID; generated on first use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            device_id: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content).with_context(|| "Failed to parse config file")
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set the server URL
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = url.trim_end_matches('/').to_string();
    }

    /// Return the device id, generating one if none is stored yet.
    /// The bool is true when a new id was generated and needs saving.
    pub fn ensure_device_id(&mut self) -> (String, bool) {
        match &self.device_id {
            Some(id) => (id.clone(), false),
            None => {
                let id = Uuid::new_v4().to_string();
                self.device_id = Some(id.clone());
                (id, true)
            }
        }
    }

    /// Forget the current device id; the next request starts a new collection
    pub fn reset_device(&mut self) -> Option<String> {
        self.device_id.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_base_url("https://momon.example/");
        let (device_id, _) = config.ensure_device_id();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url, "https://momon.example");
        assert_eq!(loaded.device_id, Some(device_id));
    }

    #[test]
    fn test_ensure_device_id_is_stable() {
        let mut config = Config::default();
        let (first, created) = config.ensure_device_id();
        assert!(created);
        assert!(Uuid::parse_str(&first).is_ok());

        let (second, created) = config.ensure_device_id();
        assert!(!created);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_device() {
        let mut config = Config::default();
        let (old, _) = config.ensure_device_id();
        assert_eq!(config.reset_device(), Some(old.clone()));

        let (new, created) = config.ensure_device_id();
        assert!(created);
        assert_ne!(old, new);
    }

    #[test]
    fn test_partial_file_uses_default_url() {
        let config: Config = toml::from_str(r#"device_id = "abc""#).unwrap();
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.device_id.as_deref(), Some("abc"));
    }
}
