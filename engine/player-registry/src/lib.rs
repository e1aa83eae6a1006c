//! Player Registry - reference data for fantasy football leagues
//!
//! Holds the player directory (id -> name and canonical position) together with
//! the league users and rosters that the trade engine reasons about.

pub mod registry;
pub mod types;

pub use registry::PlayerDirectory;
pub use types::{LeagueUser, Player, PlayerId, PlayerLookupError, Position, Roster};
