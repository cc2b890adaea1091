//! Configuration for dirkv
//!
//! Centralized configuration with sensible defaults. Configs can be built in
//! code through [`ConfigBuilder`] or loaded from a TOML document:
//!
//! ```toml
//! root_dir = "/var/lib/dirkv"
//! sync_strategy = "every_write"
//! create_root = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DirKvError, Result};

/// Main configuration for a dirkv store
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all entries
    /// Internal structure:
    ///   {root_dir}/
    ///     ├── <encoded key>        (one file per key)
    ///     └── <segment>/<segment>  (keys with interior separators)
    pub root_dir: PathBuf,

    /// Create the root directory when the store is opened.
    /// When false the root is only created lazily by the first put.
    pub create_root: bool,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: whether to fsync entry files after a put
    pub sync_strategy: SyncStrategy,
}

/// Entry file sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStrategy {
    /// Leave flushing to the OS page cache (fastest)
    #[default]
    None,

    /// fsync the entry file after every put (safest, slowest)
    EveryWrite,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./dirkv_data"),
            create_root: false,
            sync_strategy: SyncStrategy::None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a config from a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DirKvError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            DirKvError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the root directory
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Create the root directory eagerly on open
    pub fn create_root(mut self, create: bool) -> Self {
        self.config.create_root = create;
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
