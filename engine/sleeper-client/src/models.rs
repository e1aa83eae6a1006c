//! Sleeper API response shapes and their conversion into league data
//!
//! Sleeper answers `null` for unknown leagues and leaves most fields
//! nullable, so every field that can be missing is an `Option` here.

use lineup_optimizer::ProjectionEntry;
use player_registry::{LeagueUser, Player, PlayerDirectory, Position, Roster};
use serde::Deserialize;
use std::collections::HashMap;
use trade_engine::ScoringVariant;
use tracing::warn;

/// League member as returned by `/league/{id}/users`
#[derive(Debug, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    pub display_name: Option<String>,
}

/// Roster as returned by `/league/{id}/rosters`
#[derive(Debug, Deserialize)]
pub struct SleeperRoster {
    pub owner_id: Option<String>,
    pub players: Option<Vec<String>>,
}

/// Player entry from `/players/nfl`
#[derive(Debug, Deserialize)]
pub struct SleeperPlayer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub fantasy_positions: Option<Vec<String>>,
}

/// One player-week row from the projections API
#[derive(Debug, Deserialize)]
pub struct SleeperProjection {
    pub player_id: String,
    pub week: Option<u32>,
    #[serde(default)]
    pub stats: Option<ProjectedStats>,
}

/// The fantasy point totals we read out of a projection's stat line
#[derive(Debug, Default, Deserialize)]
pub struct ProjectedStats {
    pub pts_ppr: Option<f64>,
    pub pts_half_ppr: Option<f64>,
    pub pts_std: Option<f64>,
}

impl ProjectedStats {
    pub fn points(&self, variant: ScoringVariant) -> Option<f64> {
        match variant {
            ScoringVariant::Ppr => self.pts_ppr,
            ScoringVariant::HalfPpr => self.pts_half_ppr,
            ScoringVariant::Standard => self.pts_std,
        }
    }
}

/// Stat field holding total points for a scoring variant
pub fn stat_key(variant: ScoringVariant) -> &'static str {
    match variant {
        ScoringVariant::Ppr => "pts_ppr",
        ScoringVariant::HalfPpr => "pts_half_ppr",
        ScoringVariant::Standard => "pts_std",
    }
}

impl From<SleeperUser> for LeagueUser {
    fn from(user: SleeperUser) -> Self {
        let display_name = user.display_name.unwrap_or_else(|| user.user_id.clone());
        LeagueUser::new(user.user_id, display_name)
    }
}

impl SleeperPlayer {
    pub fn into_player(self, player_id: String) -> Player {
        let position = self
            .fantasy_positions
            .as_ref()
            .and_then(|positions| positions.first())
            .map(|p| p.parse().unwrap_or(Position::Unknown))
            .unwrap_or(Position::Unknown);
        let name = match (self.first_name, self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => player_id.clone(),
        };
        Player::new(player_id, name, position)
    }
}

pub fn parse_users(body: &str) -> serde_json::Result<Vec<LeagueUser>> {
    let users: Option<Vec<SleeperUser>> = serde_json::from_str(body)?;
    Ok(users.unwrap_or_default().into_iter().map(LeagueUser::from).collect())
}

/// Rosters with an owner; ownerless (orphaned) rosters are dropped
pub fn parse_rosters(body: &str) -> serde_json::Result<Vec<Roster>> {
    let rosters: Option<Vec<SleeperRoster>> = serde_json::from_str(body)?;
    let mut result = Vec::new();
    for roster in rosters.unwrap_or_default() {
        match roster.owner_id {
            Some(owner_id) => result.push(Roster::new(owner_id, roster.players.unwrap_or_default())),
            None => {
                warn!("Dropping roster without an owner ({} players)", roster.players.map_or(0, |p| p.len()))
            }
        }
    }
    Ok(result)
}

pub fn parse_players(body: &str) -> serde_json::Result<PlayerDirectory> {
    let players: Option<HashMap<String, SleeperPlayer>> = serde_json::from_str(body)?;
    Ok(PlayerDirectory::from_players(
        players.unwrap_or_default().into_iter().map(|(id, player)| player.into_player(id)),
    ))
}

/// Projections for one week; rows without a week take `week`
pub fn parse_projections(
    body: &str,
    week: u32,
    variant: ScoringVariant,
) -> serde_json::Result<Vec<ProjectionEntry>> {
    let rows: Option<Vec<SleeperProjection>> = serde_json::from_str(body)?;
    Ok(rows
        .unwrap_or_default()
        .into_iter()
        .map(|row| {
            let score = row.stats.and_then(|stats| stats.points(variant));
            ProjectionEntry::new(row.player_id, row.week.unwrap_or(week), score)
        })
        .collect())
}
