//! CLI configuration file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sleeper_client::{CacheConfig, SleeperConfig};
use std::path::Path;
use trade_engine::TradeEngineConfig;

/// Everything `trade-cli` reads from its TOML file
///
/// The engine sections (`[roster]`, `[season]`, `[search]`) sit at the top
/// level next to `[sleeper]` and `[cache]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub engine: TradeEngineConfig,

    #[serde(default)]
    pub sleeper: SleeperConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load from `path` (or defaults), then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => Self::default(),
        };

        config.engine.apply_env_overrides()?;
        config.sleeper.apply_env_overrides();
        config.cache.apply_env_overrides();
        config.engine.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use trade_engine::Position;

    #[test]
    fn test_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[roster]
single_positions = [ {{ position = "QB", count = 1 }}, {{ position = "DST", count = 1 }} ]

[season]
year = 2024
last_week = 17

[search]
max_group_size = 2

[sleeper]
timeout_secs = 10

[cache]
enabled = false
dir = "/tmp/trade-cache"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.engine.roster.single_positions[1].position, Position::DEF);
        assert!(config.engine.roster.flex_positions.is_empty());
        assert_eq!(config.engine.season.year, 2024);
        assert_eq!(config.engine.search.max_group_size, 2);
        assert!(config.engine.search.parallel);
        assert_eq!(config.sleeper.timeout_secs, 10);
        assert_eq!(config.sleeper.projections_base_url, "https://api.sleeper.app");
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
