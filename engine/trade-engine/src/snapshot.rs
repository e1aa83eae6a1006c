//! Immutable view of one league at one point in time

use crate::error::{Result, TradeEngineError};
use crate::models::CounterpartySelector;
use lineup_optimizer::{FreeAgentBench, ProjectionTable, RosterSlots};
use player_registry::{LeagueUser, Player, PlayerDirectory, PlayerId, Position, Roster};
use std::collections::HashSet;
use tracing::info;

/// Everything a search needs, fixed before the first candidate is scored
#[derive(Debug, Clone)]
pub struct LeagueSnapshot {
    pub league_id: String,
    pub users: Vec<LeagueUser>,
    pub rosters: Vec<Roster>,
    pub directory: PlayerDirectory,
    pub projections: ProjectionTable,
    /// Players on no roster that have a projection in the window, sorted by ID
    pub free_agents: Vec<PlayerId>,
}

impl LeagueSnapshot {
    /// Validate league data and derive the free agent pool
    ///
    /// Fails with `LeagueNotFound` when the league has no users or no rosters,
    /// and with `DuplicatePlayer` when a player is on two rosters.
    pub fn new(
        league_id: impl Into<String>,
        users: Vec<LeagueUser>,
        rosters: Vec<Roster>,
        directory: PlayerDirectory,
        projections: ProjectionTable,
    ) -> Result<Self> {
        let league_id = league_id.into();
        if users.is_empty() || rosters.is_empty() {
            return Err(TradeEngineError::LeagueNotFound { league_id });
        }

        let mut rostered: HashSet<&str> = HashSet::new();
        for roster in &rosters {
            for player_id in &roster.players {
                if !rostered.insert(player_id.as_str()) {
                    return Err(TradeEngineError::DuplicatePlayer { player_id: player_id.clone() });
                }
            }
        }

        let mut free_agents: Vec<PlayerId> = directory
            .ids()
            .filter(|id| !rostered.contains(id) && projections.has_projection(id))
            .map(str::to_string)
            .collect();
        free_agents.sort();

        info!(
            "League {} snapshot: {} users, {} rosters, {} rostered players, {} free agents",
            league_id,
            users.len(),
            rosters.len(),
            rostered.len(),
            free_agents.len()
        );

        Ok(Self { league_id, users, rosters, directory, projections, free_agents })
    }

    pub fn user(&self, user_id: &str) -> Option<&LeagueUser> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    /// Display name for a user, falling back to the raw ID
    pub fn display_name<'s>(&'s self, user_id: &'s str) -> &'s str {
        self.user(user_id).map(|u| u.display_name.as_str()).unwrap_or(user_id)
    }

    /// Roster owned by `user_id`
    pub fn roster_of(&self, user_id: &str) -> Result<&Roster> {
        self.rosters.iter().find(|r| r.owner_id == user_id).ok_or_else(|| {
            TradeEngineError::UserNotInLeague {
                user_id: user_id.to_string(),
                league_id: self.league_id.clone(),
            }
        })
    }

    /// Every roster except the target's
    pub fn counterparties<'s>(&'s self, target_user_id: &'s str) -> impl Iterator<Item = &'s Roster> {
        self.rosters.iter().filter(move |r| r.owner_id != target_user_id)
    }

    /// Find the roster a scenario trades with
    pub fn resolve_counterparty(&self, selector: &CounterpartySelector) -> Result<&Roster> {
        let owner_id = match selector {
            CounterpartySelector::UserId(id) => id.as_str(),
            CounterpartySelector::DisplayName(name) => self
                .users
                .iter()
                .find(|u| u.display_name == *name)
                .map(|u| u.user_id.as_str())
                .ok_or_else(|| TradeEngineError::CounterpartyNotFound {
                    selector: selector.to_string(),
                })?,
        };
        self.rosters.iter().find(|r| r.owner_id == owner_id).ok_or_else(|| {
            TradeEngineError::CounterpartyNotFound { selector: selector.to_string() }
        })
    }

    /// Directory entry for a player, or an `Unknown` placeholder
    pub fn player(&self, player_id: &str) -> Player {
        self.directory
            .get(player_id)
            .cloned()
            .unwrap_or_else(|_| Player::new(player_id, player_id, Position::Unknown))
    }

    /// Reduce the free agent pool to the entries any lineup could use
    pub fn bench(&self, slots: &RosterSlots) -> FreeAgentBench {
        FreeAgentBench::build(
            self.free_agents.iter().map(String::as_str),
            slots,
            &self.projections,
            &self.directory,
        )
    }
}
