//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\tunescout\config.toml
//! - macOS: ~/Library/Application Support/tunescout/config.toml
//! - Linux: ~/.config/tunescout/config.toml
//!
//! A different file can be given with `--config` or `TUNESCOUT_CONFIG`.
//! Missing or broken files fall back to defaults; loading never fails.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::DEFAULT_BASE_URL;
use crate::favorites::{DEFAULT_STORAGE_KEY, FileStorage};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog and search-as-you-type settings
    pub search: SearchConfig,

    /// Favorites persistence settings
    pub storage: StorageConfig,

    /// Output settings
    pub display: DisplayConfig,
}

/// Catalog and search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Catalog endpoint
    pub base_url: String,

    /// Quiet period before a query is sent, in milliseconds
    pub debounce_ms: u64,

    /// Results per request
    pub page_size: u32,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Two-letter store country (catalog default when unset)
    pub country: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: 500,
            page_size: 10,
            request_timeout_secs: 10,
            country: None,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Favorites persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for persisted state (user data directory when unset)
    pub data_dir: Option<PathBuf>,

    /// Key the favorites list is stored under
    pub favorites_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            favorites_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Storage binding for the configured directory.
    pub fn file_storage(&self) -> FileStorage {
        match &self.data_dir {
            Some(dir) => FileStorage::new(dir),
            None => FileStorage::default_location(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pixel size requested when showing artwork URLs
    pub artwork_size: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { artwork_size: 600 }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tunescout"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from `path`
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[storage]"));
        assert!(toml.contains("[display]"));
        assert!(toml.contains("debounce_ms = 500"));
    }

    #[test]
    fn test_defaults_match_catalog_contract() {
        let config = Config::default();
        assert_eq!(config.search.page_size, 10);
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
        assert_eq!(config.search.base_url, "https://itunes.apple.com");
        assert_eq!(config.storage.favorites_key, "primary");
        assert_eq!(config.display.artwork_size, 600);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[search]
debounce_ms = 250
country = "GB"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.country.as_deref(), Some("GB"));

        // Other fields use defaults
        assert_eq!(config.search.page_size, 10);
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.display.artwork_size, 600);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = Config::default();
        config.search.request_timeout_secs = 3;
        config.storage.data_dir = Some(PathBuf::from("/tmp/tunescout-data"));
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path);
        assert_eq!(loaded.search.request_timeout_secs, 3);
        assert_eq!(loaded.storage.data_dir, Some(PathBuf::from("/tmp/tunescout-data")));
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.search.debounce_ms, 500);
    }

    #[test]
    fn test_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search = [not valid").unwrap();

        let config = load_from(&path);
        assert_eq!(config.search.page_size, 10);
    }

    #[test]
    fn test_storage_uses_configured_dir() {
        let config = StorageConfig {
            data_dir: Some(PathBuf::from("/data/tunescout")),
            ..Default::default()
        };
        assert_eq!(config.file_storage().dir(), Path::new("/data/tunescout"));
    }
}
