// Configuration: where the SQLite file lives. Defaults to a file in the
// user's home directory; an optional JSON file next to it can point the
// store somewhere else.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".chocolate_accounts";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: app_dir().join("users.db"),
        }
    }
}

impl AppConfig {
    /// Load `~/.chocolate_accounts/config.json`, or the defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&app_dir().join("config.json"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg: AppConfig = serde_json::from_str(&data)
            .with_context(|| format!("Parsing config file {}", path.display()))?;
        Ok(cfg)
    }
}

/// Per-user application directory. Falls back to the current directory
/// when no home directory is known.
fn app_dir() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(APP_DIR)
}
