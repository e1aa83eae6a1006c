//! Requests, report rows and progress updates exchanged with the trade engine

use lineup_optimizer::WeekWindow;
use player_registry::{Player, PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reception weighting used by the league's scoring rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringVariant {
    /// Full point per reception
    Ppr,
    /// Half point per reception
    HalfPpr,
    /// No reception points
    Standard,
}

impl ScoringVariant {
    pub const ALL: [ScoringVariant; 3] =
        [ScoringVariant::Ppr, ScoringVariant::HalfPpr, ScoringVariant::Standard];

    pub fn label(self) -> &'static str {
        match self {
            ScoringVariant::Ppr => "PPR",
            ScoringVariant::HalfPpr => "Half PPR",
            ScoringVariant::Standard => "Standard",
        }
    }
}

impl fmt::Display for ScoringVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScoringVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            s.trim().to_ascii_lowercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        match normalized.as_str() {
            "ppr" | "full" | "fullppr" => Ok(ScoringVariant::Ppr),
            "halfppr" | "half" => Ok(ScoringVariant::HalfPpr),
            "standard" | "std" | "nonppr" => Ok(ScoringVariant::Standard),
            _ => Err(format!("Unknown scoring type '{s}' (expected PPR, Half PPR or Standard)")),
        }
    }
}

/// Request for a full trade search
#[derive(Debug, Clone)]
pub struct TradeRequest {
    pub league_id: String,
    pub target_user_id: String,
    /// Current week; scores cover this week through the end of the season
    pub week: u32,
    pub scoring_variant: ScoringVariant,
    /// Falls back to the configured default when `None`
    pub max_group_size: Option<usize>,
    /// Players at these positions are never offered or requested
    pub excluded_positions: Vec<Position>,
}

/// How the counterparty of a scenario is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterpartySelector {
    UserId(String),
    DisplayName(String),
}

impl fmt::Display for CounterpartySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterpartySelector::UserId(id) => write!(f, "user id {id}"),
            CounterpartySelector::DisplayName(name) => write!(f, "display name {name}"),
        }
    }
}

/// Request to score one hand-picked trade
#[derive(Debug, Clone)]
pub struct ScenarioRequest {
    pub league_id: String,
    pub target_user_id: String,
    pub week: u32,
    pub scoring_variant: ScoringVariant,
    pub counterparty: CounterpartySelector,
    /// Players the target sends away
    pub outgoing: Vec<PlayerId>,
    /// Players the target receives
    pub incoming: Vec<PlayerId>,
}

/// One accepted trade; scores are per-week averages over the remaining season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRow {
    pub sends: Vec<Player>,
    pub receives: Vec<Player>,
    pub counterparty_id: String,
    pub counterparty_name: String,
    pub target_before: f64,
    pub target_after: f64,
    pub counterparty_before: f64,
    pub counterparty_after: f64,
}

impl TradeRow {
    /// Improvement for the target, per week
    pub fn gain(&self) -> f64 {
        self.target_after - self.target_before
    }

    /// Change for the counterparty, per week
    pub fn counterparty_gain(&self) -> f64 {
        self.counterparty_after - self.counterparty_before
    }

    pub fn sends_label(&self) -> String {
        join_labels(&self.sends)
    }

    pub fn receives_label(&self) -> String {
        join_labels(&self.receives)
    }
}

fn join_labels(players: &[Player]) -> String {
    players.iter().map(Player::label).collect::<Vec<_>>().join(", ")
}

/// Result of a completed search
///
/// An empty `rows` means the search ran and found nothing worth proposing.
#[derive(Debug, Clone, Serialize)]
pub struct TradeSearchReport {
    pub league_id: String,
    pub target_user_id: String,
    pub target_display_name: String,
    pub window: WeekWindow,
    pub scoring_variant: ScoringVariant,
    pub max_group_size: usize,
    /// Per-week average of the target's current roster
    pub target_baseline: f64,
    /// Sorted by descending target gain
    pub rows: Vec<TradeRow>,
    pub stats: SearchStats,
}

impl TradeSearchReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Counters describing how much of the candidate space was examined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Candidate pairings enumerated
    pub candidates: u64,
    /// Dropped by the completeness check before scoring
    pub pruned: u64,
    /// Scored and rejected
    pub rejected: u64,
    /// Scored and accepted
    pub accepted: u64,
}

/// Before/after scores of a single hand-picked trade (per-week averages)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub target_before: f64,
    pub target_after: f64,
    pub counterparty_before: f64,
    pub counterparty_after: f64,
    pub counterparty_display_name: String,
    /// Whether both proposed rosters can still fill every single-position slot
    pub rosters_complete: bool,
}

impl ScenarioOutcome {
    pub fn target_change(&self) -> f64 {
        self.target_after - self.target_before
    }

    pub fn counterparty_change(&self) -> f64 {
        self.counterparty_after - self.counterparty_before
    }

    /// Whether the search would have accepted this trade
    pub fn is_beneficial(&self) -> bool {
        self.target_after > self.target_before && self.counterparty_after >= self.counterparty_before
    }
}

/// Progress notification emitted while a search runs
#[derive(Debug, Clone, PartialEq)]
pub struct SearchProgress {
    pub completed: u64,
    pub total: u64,
    /// e.g. "Evaluating Josh Allen (QB) to TeamTaco"
    pub message: String,
}

impl SearchProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.completed as f64 / self.total as f64).min(1.0)
        }
    }
}
