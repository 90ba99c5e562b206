use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk settings. The API key can also be supplied through the
/// `XAI_API_KEY` environment variable, which takes precedence over the file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the API key: environment first, then the config file. Blank
    /// values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var("XAI_API_KEY")
            .ok()
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("babybot").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_key: Some("xai-test-key".to_string()),
            model: Some("grok-3-mini".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("xai-test-key"));
        assert_eq!(loaded.model.as_deref(), Some("grok-3-mini"));
    }

    #[test]
    fn test_blank_api_key_resolves_as_missing() {
        std::env::remove_var("XAI_API_KEY");

        let config = Config {
            api_key: Some("   ".to_string()),
            model: None,
        };
        assert!(config.resolve_api_key().is_none());

        let config = Config::new();
        assert!(config.resolve_api_key().is_none());
    }

    #[test]
    fn test_config_file_key_is_used_when_env_is_unset() {
        std::env::remove_var("XAI_API_KEY");

        let config = Config {
            api_key: Some("xai-from-file".to_string()),
            model: None,
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("xai-from-file"));
    }
}
