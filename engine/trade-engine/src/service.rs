//! Async façade tying a data source to the search

use crate::config::TradeEngineConfig;
use crate::error::{Result, TradeEngineError};
use crate::models::{
    ScenarioOutcome, ScenarioRequest, ScoringVariant, SearchProgress, TradeRequest, TradeSearchReport,
};
use crate::scenario::evaluate_scenario;
use crate::search::{SearchParams, TradeSearch};
use crate::snapshot::LeagueSnapshot;
use crate::source::LeagueDataSource;
use lineup_optimizer::{ProjectionTable, WeekWindow};
use player_registry::LeagueUser;
use std::sync::Arc;
use tracing::info;

/// Trade engine service
///
/// Fetches everything a request needs from the data source once, then runs
/// the CPU-bound search on the blocking thread pool.
pub struct TradeEngineService<S: LeagueDataSource> {
    config: Arc<TradeEngineConfig>,
    source: Arc<S>,
}

impl<S: LeagueDataSource> Clone for TradeEngineService<S> {
    fn clone(&self) -> Self {
        Self { config: Arc::clone(&self.config), source: Arc::clone(&self.source) }
    }
}

impl<S: LeagueDataSource + 'static> TradeEngineService<S> {
    pub fn new(config: TradeEngineConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self { config: Arc::new(config), source: Arc::new(source) })
    }

    pub fn config(&self) -> &TradeEngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Users of a league, for turning a display name into a user ID
    pub async fn league_users(&self, league_id: &str) -> Result<Vec<LeagueUser>> {
        let users = self.source.fetch_users(league_id).await.map_err(TradeEngineError::DataSource)?;
        if users.is_empty() {
            return Err(TradeEngineError::LeagueNotFound { league_id: league_id.to_string() });
        }
        Ok(users)
    }

    /// Fetch and validate everything about a league for one scoring window
    pub async fn load_snapshot(
        &self,
        league_id: &str,
        window: WeekWindow,
        variant: ScoringVariant,
    ) -> Result<LeagueSnapshot> {
        let (users, rosters, directory, projections) = tokio::try_join!(
            self.source.fetch_users(league_id),
            self.source.fetch_rosters(league_id),
            self.source.fetch_all_players(),
            self.source.fetch_projections(self.config.season.year, window, variant),
        )
        .map_err(TradeEngineError::DataSource)?;

        info!(
            "Fetched league {}: {} users, {} rosters, {} players, {} projections for weeks {}-{} ({})",
            league_id,
            users.len(),
            rosters.len(),
            directory.len(),
            projections.len(),
            window.first,
            window.last,
            variant
        );

        let projections = ProjectionTable::build(window, projections);
        LeagueSnapshot::new(league_id, users, rosters, directory, projections)
    }

    /// Search every trade between the target and the rest of the league
    pub async fn search_trades(&self, request: TradeRequest) -> Result<TradeSearchReport> {
        let parallel = self.config.search.parallel;
        self.run_search(request, parallel, |_| {}).await
    }

    /// Like `search_trades`, but evaluates sequentially and reports progress
    pub async fn search_trades_with_progress<F>(
        &self,
        request: TradeRequest,
        progress: F,
    ) -> Result<TradeSearchReport>
    where
        F: FnMut(&SearchProgress) + Send + 'static,
    {
        self.run_search(request, false, progress).await
    }

    async fn run_search<F>(
        &self,
        request: TradeRequest,
        parallel: bool,
        mut progress: F,
    ) -> Result<TradeSearchReport>
    where
        F: FnMut(&SearchProgress) + Send + 'static,
    {
        let window = self.config.window_for(request.week)?;
        let max_group_size = request.max_group_size.unwrap_or(self.config.search.max_group_size);
        if max_group_size == 0 {
            return Err(TradeEngineError::InvalidGroupSize { size: max_group_size });
        }

        let snapshot = self.load_snapshot(&request.league_id, window, request.scoring_variant).await?;
        // Fail before spawning when the target is not in the league
        snapshot.roster_of(&request.target_user_id)?;

        let config = Arc::clone(&self.config);
        let params = SearchParams {
            max_group_size,
            excluded_positions: request.excluded_positions.clone(),
            prune_incomplete_rosters: config.search.prune_incomplete_rosters,
        };

        tokio::task::spawn_blocking(move || -> Result<TradeSearchReport> {
            let slots = &config.roster;
            let bench = snapshot.bench(slots);
            let search = TradeSearch::new(&snapshot, slots, &bench, &request.target_user_id, params)?;
            let results =
                if parallel { search.run_parallel() } else { search.run_with_progress(&mut progress) };

            Ok(TradeSearchReport {
                league_id: request.league_id.clone(),
                target_user_id: request.target_user_id.clone(),
                target_display_name: search.target_name().to_string(),
                window,
                scoring_variant: request.scoring_variant,
                max_group_size,
                target_baseline: search.target_baseline(),
                rows: results.rows,
                stats: results.stats,
            })
        })
        .await?
    }

    /// Score one proposed trade
    pub async fn evaluate_scenario(&self, request: ScenarioRequest) -> Result<ScenarioOutcome> {
        let window = self.config.window_for(request.week)?;
        let snapshot = self.load_snapshot(&request.league_id, window, request.scoring_variant).await?;
        let config = Arc::clone(&self.config);

        tokio::task::spawn_blocking(move || {
            let bench = snapshot.bench(&config.roster);
            evaluate_scenario(
                &snapshot,
                &config.roster,
                &bench,
                &request.target_user_id,
                &request.counterparty,
                &request.outgoing,
                &request.incoming,
            )
        })
        .await?
    }
}
