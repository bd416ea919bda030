//! # CLI Configuration
//!
//! Where the database lives and which currency new trips use.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     FARESHARE_DB_PATH=/tmp/trips.db                                     │
//! │     FARESHARE_CURRENCY=EUR                                              │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)                │
//! │     ~/.config/fareshare/fareshare.toml (Linux)                          │
//! │     ~/Library/Application Support/com.fareshare.fareshare/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     <data dir>/fareshare.db, USD                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # fareshare.toml
//! [database]
//! path = "/home/me/trips/fareshare.db"
//!
//! [defaults]
//! currency = "EUR"
//! ```

use std::path::PathBuf;

use directories::ProjectDirs;
use fareshare_core::validation::validate_currency_code;
use fareshare_core::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_FILE: &str = "fareshare.toml";
const DATABASE_FILE: &str = "fareshare.db";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine a data directory; set FARESHARE_DB_PATH")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Settings
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Unset means `<platform data dir>/fareshare.db`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Currency given to new trips.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for DefaultSettings {
    fn default() -> Self {
        DefaultSettings {
            currency: default_currency(),
        }
    }
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub defaults: DefaultSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default if present)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that doesn't exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else if explicit {
                return Err(ConfigError::Invalid(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document; missing sections fall back to defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_currency_code(&self.defaults.currency)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("database path is empty".into()));
            }
        }

        Ok(())
    }

    /// Applies `FARESHARE_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("FARESHARE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(currency) = lookup("FARESHARE_CURRENCY") {
            debug!(currency = %currency, "Overriding default currency from environment");
            self.defaults.currency = currency.trim().to_uppercase();
        }
    }

    /// Resolves the database file, creating its directory when defaulted.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join(DATABASE_FILE))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "fareshare", "fareshare")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.defaults.currency, "USD");
        assert!(config.database.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = CliConfig::from_toml(
            r#"
            [database]
            path = "/tmp/trips.db"

            [defaults]
            currency = "EUR"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/trips.db")));
        assert_eq!(config.defaults.currency, "EUR");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = CliConfig::from_toml("[database]\n").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            CliConfig::from_toml("[defaults\ncurrency ="),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = CliConfig::from_toml("[defaults]\ncurrency = \"EUR\"\n").unwrap();
        let env = HashMap::from([
            ("FARESHARE_DB_PATH", "/var/tmp/x.db"),
            ("FARESHARE_CURRENCY", " gbp "),
        ]);
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.defaults.currency, "GBP");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/var/tmp/x.db"));
    }

    #[test]
    fn test_validation() {
        let mut config = CliConfig::default();
        config.defaults.currency = "dollars".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.defaults.currency = "CHF".to_string();
        config.database.path = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let path = std::env::temp_dir().join("fareshare-definitely-missing.toml");
        assert!(CliConfig::load(Some(path)).is_err());
    }
}
