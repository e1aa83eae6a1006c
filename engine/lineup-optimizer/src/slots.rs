//! Lineup slot configuration

use player_registry::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A slot that only accepts one position, e.g. `RB x2`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequirement {
    pub position: Position,
    pub count: usize,
}

/// A slot that accepts any of several positions, e.g. `RB/WR/TE x1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexRequirement {
    pub eligible: Vec<Position>,
    pub count: usize,
}

impl FlexRequirement {
    pub fn accepts(&self, position: Position) -> bool {
        self.eligible.contains(&position)
    }

    /// Slot label such as "RB/WR/TE"
    pub fn label(&self) -> String {
        self.eligible.iter().map(|p| p.as_str()).collect::<Vec<_>>().join("/")
    }
}

/// The scoring rulebook: which slots a weekly lineup must fill, in fill order
///
/// Both lists are ordered; the optimizer fills single-position slots first in
/// list order, then flex slots in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlots {
    pub single_positions: Vec<SlotRequirement>,
    #[serde(default)]
    pub flex_positions: Vec<FlexRequirement>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotConfigError {
    #[error("Roster configuration has no slots")]
    NoSlots,

    #[error("Slot {slot} has a count of zero")]
    ZeroCount { slot: String },

    #[error("Flex slot #{index} has no eligible positions")]
    EmptyFlex { index: usize },

    #[error("Position {position} cannot be used in a lineup slot")]
    UnknownPosition { position: Position },
}

impl Default for RosterSlots {
    fn default() -> Self {
        Self {
            single_positions: vec![
                SlotRequirement { position: Position::QB, count: 1 },
                SlotRequirement { position: Position::RB, count: 2 },
                SlotRequirement { position: Position::WR, count: 2 },
                SlotRequirement { position: Position::TE, count: 1 },
                SlotRequirement { position: Position::K, count: 1 },
                SlotRequirement { position: Position::DEF, count: 1 },
            ],
            flex_positions: vec![FlexRequirement {
                eligible: vec![Position::RB, Position::WR, Position::TE],
                count: 1,
            }],
        }
    }
}

impl RosterSlots {
    pub fn new(single_positions: Vec<SlotRequirement>, flex_positions: Vec<FlexRequirement>) -> Self {
        Self { single_positions, flex_positions }
    }

    pub fn validate(&self) -> Result<(), SlotConfigError> {
        if self.single_positions.is_empty() && self.flex_positions.is_empty() {
            return Err(SlotConfigError::NoSlots);
        }
        for slot in &self.single_positions {
            if slot.position == Position::Unknown {
                return Err(SlotConfigError::UnknownPosition { position: slot.position });
            }
            if slot.count == 0 {
                return Err(SlotConfigError::ZeroCount { slot: slot.position.to_string() });
            }
        }
        for (index, flex) in self.flex_positions.iter().enumerate() {
            if flex.eligible.is_empty() {
                return Err(SlotConfigError::EmptyFlex { index });
            }
            if let Some(position) = flex.eligible.iter().find(|p| **p == Position::Unknown) {
                return Err(SlotConfigError::UnknownPosition { position: *position });
            }
            if flex.count == 0 {
                return Err(SlotConfigError::ZeroCount { slot: flex.label() });
            }
        }
        Ok(())
    }

    /// Total number of lineup spots per week
    pub fn total_slots(&self) -> usize {
        self.single_positions.iter().map(|s| s.count).sum::<usize>()
            + self.flex_positions.iter().map(|f| f.count).sum::<usize>()
    }

    /// How many lineup spots, single and flex, a player at `position` could fill
    ///
    /// No more than this many players of one position are ever selected in a week.
    pub fn demand(&self, position: Position) -> usize {
        let single: usize =
            self.single_positions.iter().filter(|s| s.position == position).map(|s| s.count).sum();
        let flex: usize =
            self.flex_positions.iter().filter(|f| f.accepts(position)).map(|f| f.count).sum();
        single + flex
    }

    /// `demand` for every position, indexed by `Position::index`
    pub fn demand_table(&self) -> [usize; Position::COUNT] {
        let mut table = [0; Position::COUNT];
        for position in Position::ALL {
            table[position.index()] = self.demand(position);
        }
        table
    }

    /// Whether a roster can fill every single-position slot with its own players
    ///
    /// Flex eligibility never substitutes for a single-position minimum.
    pub fn is_complete<I>(&self, positions: I) -> bool
    where
        I: IntoIterator<Item = Position>,
    {
        let mut counts = [0usize; Position::COUNT];
        for position in positions {
            counts[position.index()] += 1;
        }
        let mut required = [0usize; Position::COUNT];
        for slot in &self.single_positions {
            required[slot.position.index()] += slot.count;
        }
        counts.iter().zip(required.iter()).all(|(have, need)| have >= need)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slots() {
        let slots = RosterSlots::default();
        assert!(slots.validate().is_ok());
        assert_eq!(slots.total_slots(), 9);
        assert_eq!(slots.demand(Position::QB), 1);
        assert_eq!(slots.demand(Position::RB), 3);
        assert_eq!(slots.demand(Position::TE), 2);
        assert_eq!(slots.demand(Position::Unknown), 0);
        assert_eq!(slots.demand_table()[Position::WR.index()], 3);
    }

    #[test]
    fn test_validation_errors() {
        let slots = RosterSlots::new(vec![], vec![]);
        assert_eq!(slots.validate(), Err(SlotConfigError::NoSlots));

        let slots =
            RosterSlots::new(vec![SlotRequirement { position: Position::QB, count: 0 }], vec![]);
        assert_eq!(slots.validate(), Err(SlotConfigError::ZeroCount { slot: "QB".to_string() }));

        let slots = RosterSlots::new(
            vec![SlotRequirement { position: Position::QB, count: 1 }],
            vec![FlexRequirement { eligible: vec![], count: 1 }],
        );
        assert_eq!(slots.validate(), Err(SlotConfigError::EmptyFlex { index: 0 }));

        let slots = RosterSlots::new(
            vec![SlotRequirement { position: Position::Unknown, count: 1 }],
            vec![],
        );
        assert!(matches!(slots.validate(), Err(SlotConfigError::UnknownPosition { .. })));
    }

    #[test]
    fn test_completeness_ignores_flex() {
        let slots = RosterSlots::new(
            vec![
                SlotRequirement { position: Position::QB, count: 1 },
                SlotRequirement { position: Position::RB, count: 2 },
            ],
            vec![FlexRequirement { eligible: vec![Position::RB, Position::WR], count: 1 }],
        );

        assert!(slots.is_complete([Position::QB, Position::RB, Position::RB]));
        assert!(slots.is_complete([Position::RB, Position::QB, Position::WR, Position::RB]));
        // A WR can play flex but never covers the second RB slot
        assert!(!slots.is_complete([Position::QB, Position::RB, Position::WR]));
        assert!(!slots.is_complete([]));
    }

    #[test]
    fn test_slots_from_toml() {
        let raw = r#"
            single_positions = [
                { position = "QB", count = 1 },
                { position = "WR", count = 3 },
            ]
            flex_positions = [ { eligible = ["WR", "TE"], count = 2 } ]
        "#;
        let slots: RosterSlots = toml::from_str(raw).unwrap();
        assert_eq!(slots.single_positions[1].position, Position::WR);
        assert_eq!(slots.flex_positions[0].label(), "WR/TE");
        assert_eq!(slots.demand(Position::WR), 5);
    }
}
