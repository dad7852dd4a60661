//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! API location, where session tokens live, the denied-visitor policy for
//! protected pages, and a few remembered form values.
//!
//! Configuration is stored at `~/.config/happippang/config.json`. The
//! `HAPPIPPANG_API_URL` environment variable overrides the API URL.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::auth::DeniedPolicy;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "happippang";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable selecting the API base URL
pub const API_URL_ENV: &str = "HAPPIPPANG_API_URL";

/// Local development server
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Where session tokens are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub token_backend: TokenBackend,
    #[serde(default)]
    pub denied_policy: DeniedPolicy,
    #[serde(default)]
    pub last_username: Option<String>,
    #[serde(default)]
    pub last_store_id: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the session file and logs
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Base URL of the API: environment, then config file, then the default
    pub fn api_base_url(&self) -> String {
        resolve_api_url(std::env::var(API_URL_ENV).ok(), self.api_url.as_deref())
    }
}

fn resolve_api_url(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|url| !url.trim().is_empty())
        .or_else(|| configured.filter(|url| !url.trim().is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
