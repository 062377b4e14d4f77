//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/ventes/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/ventes/` (~/.config/ventes/)
//! - Data: `$XDG_DATA_HOME/ventes/` (~/.local/share/ventes/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Paths to the three tabular sources
    #[serde(default)]
    pub sources: SourcePaths,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Paths to the three CSV sources, in ingestion order.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePaths {
    /// Product source (default: produit.csv in the working directory)
    #[serde(default = "default_products_path")]
    pub products: PathBuf,

    /// Store source
    #[serde(default = "default_stores_path")]
    pub stores: PathBuf,

    /// Sales source
    #[serde(default = "default_sales_path")]
    pub sales: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            products: default_products_path(),
            stores: default_stores_path(),
            sales: default_sales_path(),
        }
    }
}

fn default_products_path() -> PathBuf {
    PathBuf::from("produit.csv")
}

fn default_stores_path() -> PathBuf {
    PathBuf::from("magasin.csv")
}

fn default_sales_path() -> PathBuf {
    PathBuf::from("vent.csv")
}

/// Storage configuration
#[derive(Debug, Deserialize, Default)]
pub struct StorageConfig {
    /// Database file path; defaults to the XDG data directory when unset
    pub database: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved database path.
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(Config::default_database_path)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/ventes/config.toml` (~/.config/ventes/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("ventes").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite database)
    ///
    /// `$XDG_DATA_HOME/ventes/` (~/.local/share/ventes/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("ventes")
    }

    /// Returns the default database file path
    ///
    /// `$XDG_DATA_HOME/ventes/sales_data.db`
    pub fn default_database_path() -> PathBuf {
        Self::data_dir().join("sales_data.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sources.products, PathBuf::from("produit.csv"));
        assert_eq!(config.sources.stores, PathBuf::from("magasin.csv"));
        assert_eq!(config.sources.sales, PathBuf::from("vent.csv"));
        assert!(config.storage.database.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[sources]
products = "/data/produit.csv"
sales = "/data/vent.csv"

[storage]
database = "/data/sales_data.db"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.sources.products, PathBuf::from("/data/produit.csv"));
        // Unset sections and fields keep their defaults
        assert_eq!(config.sources.stores, PathBuf::from("magasin.csv"));
        assert_eq!(
            config.storage.database_path(),
            PathBuf::from("/data/sales_data.db")
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_default_database_path() {
        let path = Config::default_database_path();
        assert!(path.ends_with("ventes/sales_data.db"));
    }
}
