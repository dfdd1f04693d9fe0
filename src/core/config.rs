//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default date format for best-by input and display (MM/DD/YYYY)
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Default currency symbol for totals
pub const DEFAULT_CURRENCY: &str = "$";

/// Database file name inside the data directory
const DB_FILE: &str = "shoplist.db";

/// Shoplist configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Location of the SQLite database
    pub db_path: Option<PathBuf>,

    /// Symbol printed before money amounts
    pub currency_symbol: Option<String>,

    /// chrono format string for best-by dates
    pub date_format: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/shoplist/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match std::fs::read_to_string(&global_path) {
                    Ok(contents) => match Self::from_yaml(&contents) {
                        Ok(global) => config.merge(global),
                        Err(e) => tracing::warn!(
                            path = %global_path.display(),
                            error = %e,
                            "ignoring unreadable config file"
                        ),
                    },
                    Err(e) => tracing::warn!(
                        path = %global_path.display(),
                        error = %e,
                        "could not read config file"
                    ),
                }
            }
        }

        // 3. Environment variables
        if let Ok(db) = std::env::var("SHOPLIST_DB") {
            config.db_path = Some(PathBuf::from(db));
        }
        if let Ok(currency) = std::env::var("SHOPLIST_CURRENCY") {
            config.currency_symbol = Some(currency);
        }

        config
    }

    /// Parse a config document
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(contents)
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "shoplist")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.db_path.is_some() {
            self.db_path = other.db_path;
        }
        if other.currency_symbol.is_some() {
            self.currency_symbol = other.currency_symbol;
        }
        if other.date_format.is_some() {
            self.date_format = other.date_format;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Database location, falling back to the platform data directory
    pub fn db_path(&self) -> PathBuf {
        if let Some(ref path) = self.db_path {
            return path.clone();
        }

        directories::ProjectDirs::from("", "", "shoplist")
            .map(|dirs| dirs.data_dir().join(DB_FILE))
            .unwrap_or_else(|| PathBuf::from(DB_FILE))
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.currency_symbol(), "$");
        assert_eq!(config.date_format(), "%m/%d/%Y");
        assert!(config.db_path().ends_with("shoplist.db"));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = Config::from_yaml("currency_symbol: \"€\"\n").unwrap();
        assert_eq!(config.currency_symbol(), "€");
        assert_eq!(config.date_format(), DEFAULT_DATE_FORMAT);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_from_yaml_rejects_wrong_types() {
        assert!(Config::from_yaml("db_path: [1, 2]\n").is_err());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            db_path: Some(PathBuf::from("/tmp/a.db")),
            currency_symbol: Some("£".to_string()),
            ..Config::default()
        };
        base.merge(Config {
            db_path: Some(PathBuf::from("/tmp/b.db")),
            date_format: Some("%Y-%m-%d".to_string()),
            ..Config::default()
        });

        assert_eq!(base.db_path(), PathBuf::from("/tmp/b.db"));
        assert_eq!(base.currency_symbol(), "£");
        assert_eq!(base.date_format(), "%Y-%m-%d");
    }
}
