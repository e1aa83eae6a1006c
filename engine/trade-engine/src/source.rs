//! Data source abstraction for league data

use crate::models::ScoringVariant;
use lineup_optimizer::{ProjectionEntry, WeekWindow};
use player_registry::{LeagueUser, PlayerDirectory, Roster};

/// Supplier of league data (users, rosters, players, projections)
///
/// Implementations deal with their own transport failures and report them as
/// `anyhow::Error`; the engine only ever sees validated in-memory data.
#[async_trait::async_trait]
pub trait LeagueDataSource: Send + Sync {
    /// Users in a league; empty when the league does not exist
    async fn fetch_users(&self, league_id: &str) -> anyhow::Result<Vec<LeagueUser>>;

    /// Rosters in a league; empty when the league does not exist
    async fn fetch_rosters(&self, league_id: &str) -> anyhow::Result<Vec<Roster>>;

    /// Every player known to the platform
    async fn fetch_all_players(&self) -> anyhow::Result<PlayerDirectory>;

    /// Weekly projections for every week of `window` under `variant`
    async fn fetch_projections(
        &self,
        season: u32,
        window: WeekWindow,
        variant: ScoringVariant,
    ) -> anyhow::Result<Vec<ProjectionEntry>>;
}

/// A data source backed by data already in memory
///
/// Useful for offline runs over a saved league and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub league_id: String,
    pub users: Vec<LeagueUser>,
    pub rosters: Vec<Roster>,
    pub directory: PlayerDirectory,
    pub projections: Vec<ProjectionEntry>,
}

impl StaticSource {
    pub fn new(
        league_id: impl Into<String>,
        users: Vec<LeagueUser>,
        rosters: Vec<Roster>,
        directory: PlayerDirectory,
        projections: Vec<ProjectionEntry>,
    ) -> Self {
        Self { league_id: league_id.into(), users, rosters, directory, projections }
    }
}

#[async_trait::async_trait]
impl LeagueDataSource for StaticSource {
    async fn fetch_users(&self, league_id: &str) -> anyhow::Result<Vec<LeagueUser>> {
        if league_id != self.league_id {
            return Ok(Vec::new());
        }
        Ok(self.users.clone())
    }

    async fn fetch_rosters(&self, league_id: &str) -> anyhow::Result<Vec<Roster>> {
        if league_id != self.league_id {
            return Ok(Vec::new());
        }
        Ok(self.rosters.clone())
    }

    async fn fetch_all_players(&self) -> anyhow::Result<PlayerDirectory> {
        Ok(self.directory.clone())
    }

    async fn fetch_projections(
        &self,
        _season: u32,
        window: WeekWindow,
        _variant: ScoringVariant,
    ) -> anyhow::Result<Vec<ProjectionEntry>> {
        Ok(self.projections.iter().filter(|p| window.contains(p.week)).cloned().collect())
    }
}
