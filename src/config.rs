//! Configuration file support for Keepsake.
//!
//! Settings are stored as versioned JSON: in a file under the user's config
//! directory on native builds, and in localStorage on WASM.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AUTOPLAY_INTERVAL_MS, DEFAULT_STORAGE_KEY};
use crate::upload::UploadPolicy;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Gallery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Key the photo collection is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Milliseconds between automatic slideshow advances
    #[serde(default = "default_autoplay_interval_ms")]
    pub autoplay_interval_ms: u64,

    /// Upload size and format limits
    #[serde(default)]
    pub upload: UploadPolicy,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_autoplay_interval_ms() -> u64 {
    DEFAULT_AUTOPLAY_INTERVAL_MS
}

impl GalleryConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage_key: default_storage_key(),
            autoplay_interval_ms: default_autoplay_interval_ms(),
            upload: UploadPolicy::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Autoplay interval as a Duration. Zero is raised to one millisecond.
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms.max(1))
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "keepsake-config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("keepsake").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("keepsake")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from a file.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load configuration from `path`, writing the defaults there when no
    /// file exists yet. An unreadable file is left in place.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_create(path: &std::path::Path) -> Self {
        if let Some(config) = Self::load_from_path(path) {
            return config;
        }

        let config = Self::default();
        if path.exists() {
            return config;
        }

        if let Err(e) = config.save_to_path(path) {
            log::warn!("Failed to write default config to {:?}: {}", path, e);
        }
        config
    }

    /// [`Self::load_or_create`] at the default path. Falls back to defaults
    /// when no config directory can be determined.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_create_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_or_create(&path),
            None => Self::default(),
        }
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "keepsake-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }

    /// Save configuration to localStorage (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))?;

        let json = self.to_json()?;

        storage
            .set_item(Self::LOCALSTORAGE_KEY, &json)
            .map_err(|e| {
                ConfigError::StorageError(format!("Failed to save to localStorage: {:?}", e))
            })?;

        log::info!("Saved configuration to localStorage");
        Ok(())
    }

    /// Load configuration from localStorage, storing the defaults when
    /// nothing usable is there (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn load_or_create_local_storage() -> Self {
        if let Some(config) = Self::load_from_local_storage() {
            return config;
        }

        let config = Self::default();
        if let Err(e) = config.save_to_local_storage() {
            log::warn!("Failed to store default configuration: {}", e);
        }
        config
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.storage_key, "anniversaryPhotos");
        assert_eq!(config.autoplay_interval(), Duration::from_millis(3000));
        assert_eq!(config.upload.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_round_trip() {
        let mut config = GalleryConfig::new();
        config.autoplay_interval_ms = 5000;
        config.log_level = LogLevel::Debug;

        let json = config.to_json().unwrap();
        assert!(json.contains("\"debug\""));
        assert_eq!(GalleryConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = GalleryConfig::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = GalleryConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut config = GalleryConfig::new();
        config.autoplay_interval_ms = 0;
        assert_eq!(config.autoplay_interval(), Duration::from_millis(1));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_path() {
        let path = std::env::temp_dir()
            .join(format!("keepsake-config-{}", std::process::id()))
            .join(GalleryConfig::default_filename());
        let mut config = GalleryConfig::new();
        config.storage_key = "custom".to_string();

        config.save_to_path(&path).unwrap();
        assert_eq!(GalleryConfig::load_from_path(&path), Some(config));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let dir = std::env::temp_dir().join(format!("keepsake-config-init-{}", std::process::id()));
        let path = dir.join(GalleryConfig::default_filename());
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(GalleryConfig::load_or_create(&path), GalleryConfig::default());
        assert_eq!(
            GalleryConfig::load_from_path(&path),
            Some(GalleryConfig::default())
        );

        // An existing file wins over the defaults
        let mut custom = GalleryConfig::new();
        custom.autoplay_interval_ms = 1500;
        custom.save_to_path(&path).unwrap();
        assert_eq!(GalleryConfig::load_or_create(&path), custom);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_or_create_keeps_unreadable_file() {
        let dir = std::env::temp_dir().join(format!("keepsake-config-bad-{}", std::process::id()));
        let path = dir.join(GalleryConfig::default_filename());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(GalleryConfig::load_or_create(&path), GalleryConfig::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
