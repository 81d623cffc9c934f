//! Store configuration
//!
//! Loaded from TOML. Every section and key is optional:
//!
//! ```toml
//! [database]
//! path = "data/metamodel.db"   # omitted: in-memory
//! foreign_keys = true
//! wal = true
//!
//! [resources]
//! root = "data/resources"
//!
//! [logging]
//! profile = "production"
//! ```

use crate::errors::{config_error, Result};
use crate::resource::FileResource;
use metamodel_core::logging_facility::{self, Profile};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level store configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub database: DatabaseConfig,
    pub resources: ResourcesConfig,
    pub logging: LoggingConfig,
}

/// `[database]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database file; `None` opens an in-memory database
    pub path: Option<PathBuf>,
    pub foreign_keys: bool,
    /// Use the WAL journal (file databases only)
    pub wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            foreign_keys: true,
            wal: true,
        }
    }
}

/// `[resources]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourcesConfig {
    /// Directory file resources are resolved against
    pub root: PathBuf,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

impl StoreConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for malformed TOML, unknown keys or
    /// mistyped values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| config_error(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded store config");
        Ok(config)
    }

    /// File resource named `name`, resolved against `[resources] root`
    pub fn resource(&self, name: &str) -> FileResource {
        FileResource::new(self.resources.root.join(name))
    }

    /// Initialize the logging facility with the configured profile
    pub fn init_logging(&self) {
        logging_facility::init(self.logging.profile);
    }
}
