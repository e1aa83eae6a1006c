//! Sleeper API integration

use crate::config::SleeperConfig;
use crate::error::{Result, SleeperError};
use crate::models::{parse_players, parse_projections, parse_rosters, parse_users};
use lineup_optimizer::{ProjectionEntry, WeekWindow};
use player_registry::{LeagueUser, PlayerDirectory, Roster};
use std::time::Duration;
use tracing::{debug, info};
use trade_engine::{LeagueDataSource, ScoringVariant};

/// Sleeper API client
#[derive(Debug, Clone)]
pub struct SleeperClient {
    config: SleeperConfig,
    client: reqwest::Client,
}

impl SleeperClient {
    pub fn new(config: SleeperConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SleeperConfig {
        &self.config
    }

    /// GET a URL and hand back the body of a successful response
    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SleeperError::Status { url: url.to_string(), status: status.as_u16() });
        }
        Ok(response.text().await?)
    }

    pub async fn league_users(&self, league_id: &str) -> Result<Vec<LeagueUser>> {
        let url = format!("{}/league/{}/users", self.config.api_base_url, league_id);
        let body = self.get_text(&url).await?;
        parse_users(&body).map_err(|source| SleeperError::Decode { url, source })
    }

    pub async fn league_rosters(&self, league_id: &str) -> Result<Vec<Roster>> {
        let url = format!("{}/league/{}/rosters", self.config.api_base_url, league_id);
        let body = self.get_text(&url).await?;
        parse_rosters(&body).map_err(|source| SleeperError::Decode { url, source })
    }

    pub async fn all_players(&self) -> Result<PlayerDirectory> {
        let url = format!("{}/players/nfl", self.config.api_base_url);
        let body = self.get_text(&url).await?;
        let directory = parse_players(&body).map_err(|source| SleeperError::Decode { url, source })?;
        info!("Loaded {} players from Sleeper", directory.len());
        Ok(directory)
    }

    pub async fn week_projections(
        &self,
        season: u32,
        week: u32,
        variant: ScoringVariant,
    ) -> Result<Vec<ProjectionEntry>> {
        let url = format!(
            "{}/projections/nfl/{}/{}?season_type=regular",
            self.config.projections_base_url, season, week
        );
        let body = self.get_text(&url).await?;
        parse_projections(&body, week, variant).map_err(|source| SleeperError::Decode { url, source })
    }
}

#[async_trait::async_trait]
impl LeagueDataSource for SleeperClient {
    async fn fetch_users(&self, league_id: &str) -> anyhow::Result<Vec<LeagueUser>> {
        Ok(self.league_users(league_id).await?)
    }

    async fn fetch_rosters(&self, league_id: &str) -> anyhow::Result<Vec<Roster>> {
        Ok(self.league_rosters(league_id).await?)
    }

    async fn fetch_all_players(&self) -> anyhow::Result<PlayerDirectory> {
        Ok(self.all_players().await?)
    }

    async fn fetch_projections(
        &self,
        season: u32,
        window: WeekWindow,
        variant: ScoringVariant,
    ) -> anyhow::Result<Vec<ProjectionEntry>> {
        let mut entries = Vec::new();
        for week in window.weeks() {
            let rows = self.week_projections(season, week, variant).await?;
            debug!("Week {} projections: {} rows", week, rows.len());
            entries.extend(rows);
        }
        info!(
            "Loaded {} {} projections for {} weeks {}-{}",
            entries.len(),
            variant,
            season,
            window.first,
            window.last
        );
        Ok(entries)
    }
}
