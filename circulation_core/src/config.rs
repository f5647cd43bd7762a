//! Configuration file support for the circulation desk.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/circdesk/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub collection: CollectionConfig,

    #[serde(default)]
    pub policy: Policy,
}

/// Where the initial book collection is read from
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CollectionConfig {
    #[serde(default = "default_collection_path")]
    pub path: PathBuf,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            path: default_collection_path(),
        }
    }
}

/// Circulation rules enforced by the desk
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// Days between check-out and the due date
    #[serde(default = "default_loan_period_days")]
    pub loan_period_days: u32,

    #[serde(default = "default_max_books_per_member")]
    pub max_books_per_member: usize,

    /// Shortest accepted search string, in characters
    #[serde(default = "default_min_search_length")]
    pub min_search_length: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            loan_period_days: default_loan_period_days(),
            max_books_per_member: default_max_books_per_member(),
            min_search_length: default_min_search_length(),
        }
    }
}

/// Longest loan the desk will accept, about ten years
pub const MAX_LOAN_PERIOD_DAYS: u32 = 3650;

impl Policy {
    /// Reject settings under which the desk cannot operate
    pub fn validate(&self) -> Result<()> {
        if self.loan_period_days == 0 || self.loan_period_days > MAX_LOAN_PERIOD_DAYS {
            return Err(Error::Config(format!(
                "loan_period_days must be between 1 and {}",
                MAX_LOAN_PERIOD_DAYS
            )));
        }
        if self.max_books_per_member == 0 {
            return Err(Error::Config(
                "max_books_per_member must be at least 1".into(),
            ));
        }
        if self.min_search_length == 0 {
            return Err(Error::Config("min_search_length must be at least 1".into()));
        }
        Ok(())
    }
}

// Default value functions
fn default_collection_path() -> PathBuf {
    PathBuf::from("collection.txt")
}

fn default_loan_period_days() -> u32 {
    7
}

fn default_max_books_per_member() -> usize {
    3
}

fn default_min_search_length() -> usize {
    4
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            other => {
                tracing::info!("No config file found at {:?}, using defaults", other);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.policy.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("circdesk").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Render the configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}
