//! Configuration management for the file share
//!
//! A share is configured once with a root directory and three permission
//! flags. Values come from an optional TOML file with environment overrides.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::storage::Permissions;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "fileshare";

/// Environment variable prefix, e.g. `FILESHARE_SHARE_PATH`, `FILESHARE_PERMISSIONS__WRITE`
pub const ENV_PREFIX: &str = "FILESHARE";

/// Directory name used under `$HOME` when no share path is configured
pub const DEFAULT_SHARE_DIR: &str = "shared_files";

/// Share configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    /// Root directory of the share
    #[serde(default = "default_share_path")]
    pub share_path: String,

    #[serde(default)]
    pub permissions: Permissions,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            share_path: default_share_path(),
            permissions: Permissions::default(),
        }
    }
}

/// `$HOME/shared_files`, or `./shared_files` without a home directory
pub fn default_share_path() -> String {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home)
            .join(DEFAULT_SHARE_DIR)
            .to_string_lossy()
            .to_string(),
        _ => format!("./{}", DEFAULT_SHARE_DIR),
    }
}

impl ShareConfig {
    pub fn new(share_path: impl Into<String>, permissions: Permissions) -> Self {
        Self {
            share_path: share_path.into(),
            permissions,
        }
    }

    /// Load from `fileshare.toml` (if present) with `FILESHARE_*` overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from the given file stem (if present) with `FILESHARE_*` overrides
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: ShareConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Get share path as PathBuf
    pub fn share_path(&self) -> PathBuf {
        PathBuf::from(&self.share_path)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.share_path.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "share_path cannot be empty".into(),
            ));
        }

        if self.share_path.contains('\0') {
            return Err(config::ConfigError::Message(
                "share_path cannot contain NUL bytes".into(),
            ));
        }

        if Path::new(&self.share_path).parent().is_none() {
            return Err(config::ConfigError::Message(
                "share_path cannot be the filesystem root".into(),
            ));
        }

        Ok(())
    }
}
