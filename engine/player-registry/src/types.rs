use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Opaque player identifier as issued by the fantasy platform (e.g. "4046", "BUF")
pub type PlayerId = String;

/// Canonical fantasy position of a player
///
/// Anything the platform reports that is not one of the known positions
/// (including a missing position) maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
    DL,
    LB,
    DB,
    Unknown,
}

impl Position {
    /// Number of distinct positions, `Unknown` included
    pub const COUNT: usize = 10;

    pub const ALL: [Position; Position::COUNT] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DEF,
        Position::DL,
        Position::LB,
        Position::DB,
        Position::Unknown,
    ];

    /// Dense index in `0..Position::COUNT`, stable across runs
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::DB => "DB",
            Position::Unknown => "None",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let position = match s.trim().to_ascii_uppercase().as_str() {
            "QB" => Position::QB,
            "RB" => Position::RB,
            "WR" => Position::WR,
            "TE" => Position::TE,
            "K" => Position::K,
            "DEF" | "DST" | "D/ST" => Position::DEF,
            "DL" => Position::DL,
            "LB" => Position::LB,
            "DB" => Position::DB,
            _ => Position::Unknown,
        };
        Ok(position)
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Position::Unknown)
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.as_str().to_string()
    }
}

/// A fantasy football player as seen by the trade engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Platform player ID
    pub player_id: PlayerId,

    /// Display name (e.g., "Josh Allen")
    pub name: String,

    /// Canonical fantasy position
    pub position: Position,
}

impl Player {
    pub fn new(player_id: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
        Self { player_id: player_id.into(), name: name.into(), position }
    }

    /// Human readable label, e.g. "Josh Allen (QB)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.position)
    }
}

/// A member of a league
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueUser {
    pub user_id: String,
    pub display_name: String,
}

impl LeagueUser {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), display_name: display_name.into() }
    }
}

/// The set of players currently held by one league member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// User ID of the owner
    pub owner_id: String,

    /// Player IDs on the roster (ordered for deterministic enumeration)
    pub players: BTreeSet<PlayerId>,
}

impl Roster {
    pub fn new<I, S>(owner_id: impl Into<String>, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { owner_id: owner_id.into(), players: players.into_iter().map(Into::into).collect() }
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.contains(player_id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Errors that can occur during player lookup
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerLookupError {
    /// Player ID not present in the directory
    PlayerNotFound(String),

    /// Directory has not been loaded
    DirectoryEmpty,
}

impl fmt::Display for PlayerLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerLookupError::PlayerNotFound(id) => {
                write!(f, "Player '{id}' not found in directory")
            }
            PlayerLookupError::DirectoryEmpty => {
                write!(f, "Player directory is empty")
            }
        }
    }
}

impl std::error::Error for PlayerLookupError {}
