//! # Lineup Optimizer
//!
//! Scores a set of available players by filling the league's lineup slots
//! week by week, highest projection first. Single-position slots are filled
//! before flex slots; a slot nobody can fill contributes zero.
//!
//! The free agent pool is folded in through a [`FreeAgentBench`], which keeps
//! only the free agents that could ever win a slot.

pub mod bench;
pub mod optimizer;
pub mod projections;
pub mod slots;

pub use bench::{BenchEntry, FreeAgentBench};
pub use optimizer::{LineupOptimizer, SlotKind, SlotPick, WeekLineup};
pub use projections::{ProjectionEntry, ProjectionTable, WeekWindow};
pub use slots::{FlexRequirement, RosterSlots, SlotConfigError, SlotRequirement};
