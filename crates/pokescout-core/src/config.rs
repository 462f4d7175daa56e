use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
///
/// Only two knobs matter to this layer: where the remote catalog lives
/// and where the internal list API lives. Loaded from the config file
/// when present, defaults otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub lists: ListsConfig,
}

impl Config {
    /// Load config from the default location or fall back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Config file path: XDG on Linux/macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("pokescout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Remote catalog base URL (a PokeAPI mirror works too)
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
}

fn default_catalog_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsConfig {
    /// Internal favorites/team API base URL
    #[serde(default = "default_lists_url")]
    pub base_url: String,
}

fn default_lists_url() -> String {
    "http://localhost:3001".to_string()
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            base_url: default_lists_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.lists.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("base_url"));

        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.catalog.base_url, config.catalog.base_url);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.catalog.base_url, "https://pokeapi.co/api/v2");
    }
}
