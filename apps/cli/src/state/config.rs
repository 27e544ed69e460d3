//! # App Configuration
//!
//! Where the inventory API lives and where the cart is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --api-url, --db                                                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     STOCKCART_API_URL=http://localhost:3333                            │
//! │     STOCKCART_API_TIMEOUT_SECS=5                                       │
//! │     STOCKCART_DB_PATH=/tmp/stockcart.db                                │
//! │     STOCKCART_STORAGE_KEY=@stockcart:cart                              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/stockcart/stockcart.toml (Linux)                         │
//! │     ~/Library/Application Support/dev.stockcart.stockcart/... (macOS)  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # stockcart.toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/home/me/.local/share/stockcart/stockcart.db"
//! key = "@stockcart:cart"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use stockcart_client::InventoryApiConfig;
use stockcart_core::CART_STORAGE_KEY;

const CONFIG_FILE: &str = "stockcart.toml";
const DATABASE_FILE: &str = "stockcart.db";

// =============================================================================
// Errors
// =============================================================================

/// Configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No home directory to derive default paths from.
    #[error("Could not determine the app data directory")]
    NoDataDir,
}

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Inventory API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the inventory API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout() -> u64 {
    stockcart_client::config::DEFAULT_TIMEOUT_SECS
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key the cart is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            key: default_key(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete app configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default if present)
    /// 3. Environment variables
    ///
    /// Validation is left to the caller, after command-line overrides.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.api.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.key must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("STOCKCART_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = var("STOCKCART_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric STOCKCART_API_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = var("STOCKCART_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = var("STOCKCART_STORAGE_KEY") {
            self.storage.key = key;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "stockcart", "stockcart")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolves the SQLite file, falling back to the platform data dir.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .ok_or(ConfigError::NoDataDir)
    }

    /// Builds the inventory client settings.
    pub fn inventory_api(&self) -> InventoryApiConfig {
        InventoryApiConfig::new(self.api.base_url.trim())
            .timeout(Duration::from_secs(self.api.timeout_secs))
    }
}
