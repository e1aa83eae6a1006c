//! Weekly projection index

use player_registry::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One projected score for one player in one week
///
/// `proj_score` is `None` when the platform lists the player without a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionEntry {
    pub player_id: PlayerId,
    pub week: u32,
    pub proj_score: Option<f64>,
}

impl ProjectionEntry {
    pub fn new(player_id: impl Into<String>, week: u32, proj_score: Option<f64>) -> Self {
        Self { player_id: player_id.into(), week, proj_score }
    }
}

/// Inclusive range of weeks being evaluated (current week through season end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    pub first: u32,
    pub last: u32,
}

impl WeekWindow {
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, week: u32) -> bool {
        week >= self.first && week <= self.last
    }

    /// Number of weeks in the window; this is the per-week average divisor
    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn weeks(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }

    fn offset(&self, week: u32) -> Option<usize> {
        self.contains(week).then(|| (week - self.first) as usize)
    }
}

/// Projection lookup keyed by (player, week), built once per search
///
/// Each player maps to a dense vector over the window; weeks without a
/// projection (or with a null one) read as 0.0.
#[derive(Debug, Clone)]
pub struct ProjectionTable {
    window: WeekWindow,
    scores: HashMap<PlayerId, Vec<f64>>,
}

impl ProjectionTable {
    /// Index the entries that fall inside `window`; entries outside it are ignored
    pub fn build<I>(window: WeekWindow, entries: I) -> Self
    where
        I: IntoIterator<Item = ProjectionEntry>,
    {
        let weeks = window.len();
        let mut scores: HashMap<PlayerId, Vec<f64>> = HashMap::new();
        let mut ignored = 0usize;

        for entry in entries {
            let Some(offset) = window.offset(entry.week) else {
                ignored += 1;
                continue;
            };
            let row = scores.entry(entry.player_id).or_insert_with(|| vec![0.0; weeks]);
            row[offset] = entry.proj_score.unwrap_or(0.0);
        }

        debug!(
            "Projection table built for weeks {}-{}: {} players, {} entries outside window",
            window.first,
            window.last,
            scores.len(),
            ignored
        );

        Self { window, scores }
    }

    pub fn window(&self) -> WeekWindow {
        self.window
    }

    /// Projected score for a player in a week; 0.0 when missing
    pub fn score(&self, player_id: &str, week: u32) -> f64 {
        match (self.scores.get(player_id), self.window.offset(week)) {
            (Some(row), Some(offset)) => row[offset],
            _ => 0.0,
        }
    }

    /// Whether the player has any entry inside the window
    pub fn has_projection(&self, player_id: &str) -> bool {
        self.scores.contains_key(player_id)
    }

    /// Number of players with at least one entry in the window
    pub fn player_count(&self) -> usize {
        self.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        let window = WeekWindow::new(5, 17);
        assert_eq!(window.len(), 13);
        assert!(window.contains(5));
        assert!(window.contains(17));
        assert!(!window.contains(4));
        assert_eq!(window.weeks().count(), 13);

        assert!(WeekWindow::new(18, 17).is_empty());
    }

    #[test]
    fn test_lookup_defaults_to_zero() {
        let table = ProjectionTable::build(
            WeekWindow::new(3, 5),
            vec![
                ProjectionEntry::new("a", 3, Some(12.5)),
                ProjectionEntry::new("a", 5, None),
                ProjectionEntry::new("b", 4, Some(7.0)),
                ProjectionEntry::new("c", 2, Some(30.0)),
            ],
        );

        assert_eq!(table.score("a", 3), 12.5);
        assert_eq!(table.score("a", 4), 0.0);
        assert_eq!(table.score("a", 5), 0.0);
        assert_eq!(table.score("b", 4), 7.0);
        assert_eq!(table.score("zzz", 4), 0.0);
        assert_eq!(table.score("a", 9), 0.0);

        // Week 2 is outside the window
        assert!(!table.has_projection("c"));
        assert_eq!(table.player_count(), 2);
    }

    #[test]
    fn test_entry_deserializes_null_score() {
        let entry: ProjectionEntry =
            serde_json::from_str(r#"{"player_id":"4046","week":3,"proj_score":null}"#).unwrap();
        assert_eq!(entry.proj_score, None);
    }
}
