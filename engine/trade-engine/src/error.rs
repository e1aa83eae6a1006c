//! Error types for the trade engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TradeEngineError {
    #[error("League not found: {league_id}")]
    LeagueNotFound { league_id: String },

    #[error("User {user_id} is not a member of league {league_id}")]
    UserNotInLeague { user_id: String, league_id: String },

    #[error("Counterparty not found: {selector}")]
    CounterpartyNotFound { selector: String },

    #[error("Week {week} is outside the season (1-{last_week})")]
    WeekOutOfRange { week: u32, last_week: u32 },

    #[error("Invalid max group size: {size} (must be at least 1)")]
    InvalidGroupSize { size: usize },

    #[error("Trade group for {side} is empty")]
    EmptyTradeGroup { side: &'static str },

    #[error("Player {player_id} is not on the roster of {owner_id}")]
    PlayerNotOnRoster { player_id: String, owner_id: String },

    #[error("Player {player_id} appears on more than one roster")]
    DuplicatePlayer { player_id: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Data source error: {0:#}")]
    DataSource(anyhow::Error),

    #[error("Search task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, TradeEngineError>;
