//! Persistent CLI configuration and path resolution.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";
const DB_PATH_ENV: &str = "SERIALS_DB_PATH";
const SHARE_DIR_ENV: &str = "SERIALS_SHARE_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default)]
    pub share_dir: Option<PathBuf>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("serials")
        .join(CONFIG_FILE_NAME)
}

impl CliConfig {
    /// Load the config file, or defaults when it does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {}",
                path.display(),
                error
            ))
        })?;
        serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {}",
                path.display(),
                error
            ))
        })
    }

    /// Database path: flag, then `SERIALS_DB_PATH`, then config, then the
    /// platform data directory.
    pub fn resolve_db_path(&self, cli_db_path: Option<PathBuf>) -> PathBuf {
        cli_db_path
            .or_else(|| non_empty_env_path(DB_PATH_ENV))
            .or_else(|| self.db_path.clone())
            .unwrap_or_else(default_db_path)
    }

    /// Share staging directory: `SERIALS_SHARE_DIR`, then config, then a
    /// folder in the system temp directory.
    pub fn resolve_share_dir(&self) -> PathBuf {
        non_empty_env_path(SHARE_DIR_ENV)
            .or_else(|| self.share_dir.clone())
            .unwrap_or_else(default_share_dir)
    }
}

fn non_empty_env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("serials")
        .join("serials.db")
}

pub fn default_share_dir() -> PathBuf {
    env::temp_dir().join("serials-share")
}
