//! # Trade Engine
//!
//! Finds mutually non-harmful trades for one fantasy team. Every roster in the
//! league is scored with the lineup optimizer over the rest of the season; a
//! trade is proposed when it strictly improves the target team and leaves the
//! counterparty at least as well off.
//!
//! Data comes from any [`LeagueDataSource`]. [`TradeEngineService`] fetches it
//! once per request and runs the search on the blocking thread pool.

pub mod combinations;
pub mod config;
pub mod error;
pub mod models;
pub mod scenario;
pub mod search;
pub mod service;
pub mod snapshot;
pub mod source;


pub use config::{
    SearchConfig, SeasonConfig, TradeEngineConfig, DEFAULT_LAST_WEEK, DEFAULT_MAX_GROUP_SIZE,
};
pub use error::{Result, TradeEngineError};
pub use models::{
    CounterpartySelector, ScenarioOutcome, ScenarioRequest, ScoringVariant, SearchProgress,
    SearchStats, TradeRequest, TradeRow, TradeSearchReport,
};
pub use scenario::evaluate_scenario;
pub use search::{AcceptedTrade, Candidates, Evaluation, SearchParams, SearchResults, TradeCandidate, TradeSearch};
pub use service::TradeEngineService;
pub use snapshot::LeagueSnapshot;
pub use source::{LeagueDataSource, StaticSource};

/// Re-export commonly used types
pub use lineup_optimizer::{RosterSlots, WeekWindow};
pub use player_registry::{LeagueUser, Player, PlayerDirectory, PlayerId, Position, Roster};
