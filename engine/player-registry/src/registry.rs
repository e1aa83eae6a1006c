use crate::types::{Player, PlayerLookupError, Position};
use std::collections::HashMap;
use tracing::info;

/// Player Directory - maps player IDs to names and canonical positions
///
/// Loaded once per session from the fantasy platform and treated as
/// immutable reference data afterwards.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    /// Map from player ID to Player
    players_by_id: HashMap<String, Player>,
}

impl PlayerDirectory {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self { players_by_id: HashMap::new() }
    }

    /// Build a directory from a list of players; later duplicates win
    pub fn from_players(players: impl IntoIterator<Item = Player>) -> Self {
        let mut directory = Self::new();
        for player in players {
            directory.insert(player);
        }
        info!("Player directory built with {} players", directory.len());
        directory
    }

    pub fn insert(&mut self, player: Player) {
        self.players_by_id.insert(player.player_id.clone(), player);
    }

    /// Get a player by ID
    pub fn get(&self, player_id: &str) -> Result<&Player, PlayerLookupError> {
        if self.players_by_id.is_empty() {
            return Err(PlayerLookupError::DirectoryEmpty);
        }
        self.players_by_id
            .get(player_id)
            .ok_or_else(|| PlayerLookupError::PlayerNotFound(player_id.to_string()))
    }

    /// Canonical position of a player; unknown IDs map to `Position::Unknown`
    pub fn position_of(&self, player_id: &str) -> Position {
        self.players_by_id.get(player_id).map(|p| p.position).unwrap_or(Position::Unknown)
    }

    /// "Name (POS)" for known players, the bare ID otherwise
    pub fn label_of(&self, player_id: &str) -> String {
        match self.players_by_id.get(player_id) {
            Some(player) => player.label(),
            None => format!("{player_id} ({})", Position::Unknown),
        }
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players_by_id.contains_key(player_id)
    }

    /// Iterate over all players (unordered)
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players_by_id.values()
    }

    /// Iterate over all player IDs (unordered)
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.players_by_id.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.players_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players_by_id.is_empty()
    }
}
