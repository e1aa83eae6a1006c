//! Free agent filler pool

use crate::projections::{ProjectionTable, WeekWindow};
use crate::slots::RosterSlots;
use player_registry::{PlayerDirectory, PlayerId, Position};
use tracing::info;

/// A free agent that may fill a lineup spot in a given week
#[derive(Debug, Clone, PartialEq)]
pub struct BenchEntry {
    pub player_id: PlayerId,
    pub position: Position,
    pub score: f64,
}

/// The part of the free agent pool that can matter to any lineup
///
/// For every week and position only the best `demand(position)` free agents
/// are kept: a lineup never starts more players of a position than it has
/// spots for, so anyone further down the list can never be selected.
#[derive(Debug, Clone)]
pub struct FreeAgentBench {
    window: WeekWindow,
    weeks: Vec<Vec<BenchEntry>>,
}

impl FreeAgentBench {
    /// A bench with no free agents
    pub fn empty(window: WeekWindow) -> Self {
        Self { window, weeks: vec![Vec::new(); window.len()] }
    }

    pub fn build<'a, I>(
        free_agents: I,
        slots: &RosterSlots,
        projections: &ProjectionTable,
        directory: &PlayerDirectory,
    ) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let window = projections.window();
        let demand = slots.demand_table();

        let candidates: Vec<(&str, Position)> = free_agents
            .into_iter()
            .map(|id| (id, directory.position_of(id)))
            .filter(|(_, position)| demand[position.index()] > 0)
            .collect();

        let mut weeks = Vec::with_capacity(window.len());
        for week in window.weeks() {
            let mut by_position: Vec<Vec<BenchEntry>> = vec![Vec::new(); Position::COUNT];
            for (id, position) in &candidates {
                by_position[position.index()].push(BenchEntry {
                    player_id: id.to_string(),
                    position: *position,
                    score: projections.score(id, week),
                });
            }

            let mut kept = Vec::new();
            for (index, mut entries) in by_position.into_iter().enumerate() {
                entries.sort_by(|a, b| {
                    b.score.total_cmp(&a.score).then_with(|| a.player_id.cmp(&b.player_id))
                });
                entries.truncate(demand[index]);
                kept.extend(entries);
            }
            weeks.push(kept);
        }

        let bench = Self { window, weeks };
        info!(
            "Free agent bench built from {} eligible free agents ({} entries over {} weeks)",
            candidates.len(),
            bench.len(),
            window.len()
        );
        bench
    }

    pub fn window(&self) -> WeekWindow {
        self.window
    }

    /// Bench entries for one week; empty outside the window
    pub fn week(&self, week: u32) -> &[BenchEntry] {
        if !self.window.contains(week) {
            return &[];
        }
        self.weeks
            .get((week - self.window.first) as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total entries across all weeks
    pub fn len(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
