//! Configuration for the trade engine

use crate::error::{Result, TradeEngineError};
use lineup_optimizer::{RosterSlots, WeekWindow};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default last week of the fantasy regular season
pub const DEFAULT_LAST_WEEK: u32 = 17;

/// Default maximum number of players per side of a trade
pub const DEFAULT_MAX_GROUP_SIZE: usize = 1;

/// Trade engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEngineConfig {
    /// Lineup slots every roster is scored against
    #[serde(default)]
    pub roster: RosterSlots,

    /// Season calendar
    #[serde(default)]
    pub season: SeasonConfig,

    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Season year used when fetching projections (e.g., 2025)
    pub year: u32,

    /// Last week whose projections count toward rest-of-season scores
    pub last_week: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Group size used when a request does not specify one
    pub max_group_size: usize,

    /// Skip candidates that leave either roster unable to fill its single-position slots
    pub prune_incomplete_rosters: bool,

    /// Evaluate candidates on the rayon thread pool
    pub parallel: bool,
}

impl Default for TradeEngineConfig {
    fn default() -> Self {
        Self {
            roster: RosterSlots::default(),
            season: SeasonConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self { year: 2025, last_week: DEFAULT_LAST_WEEK }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_group_size: DEFAULT_MAX_GROUP_SIZE, prune_incomplete_rosters: true, parallel: true }
    }
}

impl TradeEngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TradeEngineError::InvalidConfig {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let config: TradeEngineConfig =
            toml::from_str(&content).map_err(|e| TradeEngineError::InvalidConfig {
                message: format!("Failed to parse {}: {e}", path.display()),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `TRADE_ENGINE_*` environment variables when present
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(year) = std::env::var("TRADE_ENGINE_SEASON") {
            self.season.year = parse_env("TRADE_ENGINE_SEASON", &year)?;
        }

        if let Ok(last_week) = std::env::var("TRADE_ENGINE_LAST_WEEK") {
            self.season.last_week = parse_env("TRADE_ENGINE_LAST_WEEK", &last_week)?;
        }

        if let Ok(max_group) = std::env::var("TRADE_ENGINE_MAX_GROUP") {
            self.search.max_group_size = parse_env("TRADE_ENGINE_MAX_GROUP", &max_group)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.roster.validate().map_err(|e| TradeEngineError::InvalidConfig {
            message: format!("Invalid roster slots: {e}"),
        })?;
        if self.season.last_week == 0 {
            return Err(TradeEngineError::InvalidConfig {
                message: "season.last_week must be at least 1".to_string(),
            });
        }
        if self.search.max_group_size == 0 {
            return Err(TradeEngineError::InvalidConfig {
                message: "search.max_group_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Weeks from `week` through the end of the season
    pub fn window_for(&self, week: u32) -> Result<WeekWindow> {
        if week == 0 || week > self.season.last_week {
            return Err(TradeEngineError::WeekOutOfRange { week, last_week: self.season.last_week });
        }
        Ok(WeekWindow::new(week, self.season.last_week))
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| TradeEngineError::InvalidConfig { message: format!("Invalid {name}: {value}") })
}
