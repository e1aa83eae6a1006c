//! Sleeper client and cache configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sleeper API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeperConfig {
    /// Base URL of the league API (users, rosters, players)
    pub api_base_url: String,

    /// Base URL of the projections API
    pub projections_base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// On-disk snapshot cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Root directory; each data kind gets its own subdirectory
    pub dir: PathBuf,
}

impl Default for SleeperConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.sleeper.app/v1".to_string(),
            projections_base_url: "https://api.sleeper.app".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true, dir: PathBuf::from("data") }
    }
}

impl SleeperConfig {
    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SLEEPER_API_BASE_URL") {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("TRADE_ENGINE_CACHE_DIR") {
            self.dir = PathBuf::from(dir);
        }
    }
}
