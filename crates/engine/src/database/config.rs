//! Database configuration via `xmlstore.toml`
//!
//! On first open a commented default `xmlstore.toml` is written to the data
//! directory. To change settings, edit the file and reopen the database.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use xmlstore_core::{Error, Limits, Result, DEFAULT_MAX_NESTING_DEPTH};

/// Config file name placed in the database data directory.
pub const CONFIG_FILE_NAME: &str = "xmlstore.toml";

/// Database configuration loaded from `xmlstore.toml`.
///
/// # Example
///
/// ```toml
/// database_file = "xmlstore.db"
/// busy_timeout_ms = 5000
/// max_nesting_depth = 256
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlStoreConfig {
    /// SQLite file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,
    /// How long a connection waits on a locked database, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Deepest element nesting accepted on save and walked on read.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

fn default_database_file() -> String {
    "xmlstore.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

impl Default for XmlStoreConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            busy_timeout_ms: default_busy_timeout_ms(),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

impl XmlStoreConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# xmlstore database configuration
#
# SQLite file holding all documents, relative to this directory.
database_file = "xmlstore.db"

# Milliseconds a connection waits for a lock held by another connection.
busy_timeout_ms = 5000

# Deepest element nesting accepted when saving (root element = 1).
# Documents nested deeper are rejected before anything is written.
max_nesting_depth = 256
"#
    }

    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `database_file` is empty or
    /// `max_nesting_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.database_file.trim().is_empty() {
            return Err(config_error("database_file must not be empty"));
        }
        if self.max_nesting_depth == 0 {
            return Err(config_error("max_nesting_depth must be at least 1"));
        }
        Ok(())
    }

    /// Traversal limits derived from this config.
    pub fn limits(&self) -> Limits {
        Limits {
            max_nesting_depth: self.max_nesting_depth,
        }
    }

    /// Busy timeout as a `Duration`.
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: XmlStoreConfig = toml::from_str(&content).map_err(|e| {
            config_error(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                config_error(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| config_error(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            config_error(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

fn config_error(reason: impl Into<String>) -> Error {
    Error::Config {
        reason: reason.into(),
    }
}
