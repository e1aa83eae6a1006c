//! Greedy optimal lineup scoring
//!
//! Each week, every single-position slot takes the best remaining player at
//! that exact position, then every flex slot takes the best remaining player
//! among its eligible positions. Candidates are pre-sorted per position
//! (score descending, player ID ascending) and consumed with a cursor, so a
//! week costs one sort per position plus a linear walk over the slots.
//!
//! Ties on score go to the lowest player ID.

use crate::bench::FreeAgentBench;
use crate::projections::{ProjectionTable, WeekWindow};
use crate::slots::RosterSlots;
use player_registry::{PlayerDirectory, PlayerId, Position};
use std::cmp::Ordering;

/// Which kind of slot a pick filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    Single(Position),
    Flex(Vec<Position>),
}

/// One filled (or unfillable) lineup spot
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPick {
    pub slot: SlotKind,
    /// `None` when no remaining player could fill the slot
    pub player_id: Option<PlayerId>,
    pub score: f64,
}

/// The optimal lineup for one week
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLineup {
    pub week: u32,
    pub picks: Vec<SlotPick>,
    pub total: f64,
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'p> {
    player_id: &'p str,
    score: f64,
}

impl Candidate<'_> {
    /// Best first: higher score, then lower player ID
    fn rank(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        b.score.total_cmp(&a.score).then_with(|| a.player_id.cmp(b.player_id))
    }
}

/// Scores rosters against a fixed slot configuration and projection table
///
/// Holds only shared references, so one optimizer can be used from many
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct LineupOptimizer<'a> {
    slots: &'a RosterSlots,
    projections: &'a ProjectionTable,
    directory: &'a PlayerDirectory,
    demand: [usize; Position::COUNT],
}

impl<'a> LineupOptimizer<'a> {
    pub fn new(
        slots: &'a RosterSlots,
        projections: &'a ProjectionTable,
        directory: &'a PlayerDirectory,
    ) -> Self {
        Self { slots, projections, directory, demand: slots.demand_table() }
    }

    pub fn slots(&self) -> &'a RosterSlots {
        self.slots
    }

    pub fn projections(&self) -> &'a ProjectionTable {
        self.projections
    }

    pub fn directory(&self) -> &'a PlayerDirectory {
        self.directory
    }

    pub fn window(&self) -> WeekWindow {
        self.projections.window()
    }

    /// Optimal score for one week
    pub fn week_score(&self, players: &[&str], bench: &FreeAgentBench, week: u32) -> f64 {
        let resolved = self.resolve(players);
        self.fill_week(&resolved, bench, week, None)
    }

    /// Sum of optimal weekly scores over the whole window
    pub fn season_score(&self, players: &[&str], bench: &FreeAgentBench) -> f64 {
        let resolved = self.resolve(players);
        self.window().weeks().map(|week| self.fill_week(&resolved, bench, week, None)).sum()
    }

    /// Season total divided by the number of weeks in the window
    pub fn per_week(&self, season_total: f64) -> f64 {
        let weeks = self.window().len();
        if weeks == 0 {
            0.0
        } else {
            season_total / weeks as f64
        }
    }

    /// The optimal lineup for one week, slot by slot
    pub fn week_lineup(&self, players: &[&str], bench: &FreeAgentBench, week: u32) -> WeekLineup {
        let resolved = self.resolve(players);
        let mut picks = Vec::with_capacity(self.slots.total_slots());
        let total = self.fill_week(&resolved, bench, week, Some(&mut picks));
        WeekLineup { week, picks, total }
    }

    /// Attach positions and drop players no slot can ever use
    fn resolve<'p>(&self, players: &[&'p str]) -> Vec<(&'p str, Position)> {
        players
            .iter()
            .map(|id| (*id, self.directory.position_of(id)))
            .filter(|(_, position)| self.demand[position.index()] > 0)
            .collect()
    }

    fn fill_week<'p>(
        &self,
        resolved: &[(&'p str, Position)],
        bench: &'p FreeAgentBench,
        week: u32,
        mut picks: Option<&mut Vec<SlotPick>>,
    ) -> f64 {
        let mut buckets: [Vec<Candidate<'p>>; Position::COUNT] =
            std::array::from_fn(|_| Vec::new());

        for &(player_id, position) in resolved {
            buckets[position.index()]
                .push(Candidate { player_id, score: self.projections.score(player_id, week) });
        }
        for entry in bench.week(week) {
            buckets[entry.position.index()]
                .push(Candidate { player_id: &entry.player_id, score: entry.score });
        }
        for bucket in buckets.iter_mut().filter(|b| b.len() > 1) {
            bucket.sort_by(Candidate::rank);
        }

        let mut cursor = [0usize; Position::COUNT];
        let mut total = 0.0;

        for slot in &self.slots.single_positions {
            let idx = slot.position.index();
            for _ in 0..slot.count {
                let pick = buckets[idx].get(cursor[idx]);
                if pick.is_some() {
                    cursor[idx] += 1;
                }
                total += pick.map_or(0.0, |c| c.score);
                if let Some(picks) = picks.as_mut() {
                    picks.push(SlotPick {
                        slot: SlotKind::Single(slot.position),
                        player_id: pick.map(|c| c.player_id.to_string()),
                        score: pick.map_or(0.0, |c| c.score),
                    });
                }
            }
        }

        for flex in &self.slots.flex_positions {
            for _ in 0..flex.count {
                let mut best: Option<(usize, Candidate<'p>)> = None;
                for position in &flex.eligible {
                    let idx = position.index();
                    if let Some(candidate) = buckets[idx].get(cursor[idx]) {
                        let better = match &best {
                            Some((_, current)) => {
                                Candidate::rank(candidate, current) == Ordering::Less
                            }
                            None => true,
                        };
                        if better {
                            best = Some((idx, *candidate));
                        }
                    }
                }
                if let Some((idx, _)) = best {
                    cursor[idx] += 1;
                }
                total += best.map_or(0.0, |(_, c)| c.score);
                if let Some(picks) = picks.as_mut() {
                    picks.push(SlotPick {
                        slot: SlotKind::Flex(flex.eligible.clone()),
                        player_id: best.map(|(_, c)| c.player_id.to_string()),
                        score: best.map_or(0.0, |(_, c)| c.score),
                    });
                }
            }
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projections::ProjectionEntry;
    use crate::slots::{FlexRequirement, SlotRequirement};
    use player_registry::Player;

    fn single(position: Position, count: usize) -> SlotRequirement {
        SlotRequirement { position, count }
    }

    fn week_one(entries: &[(&str, f64)]) -> ProjectionTable {
        ProjectionTable::build(
            WeekWindow::new(1, 1),
            entries.iter().map(|(id, score)| ProjectionEntry::new(*id, 1, Some(*score))),
        )
    }

    #[test]
    fn test_single_slots_take_best_per_position() {
        let slots = RosterSlots::new(vec![single(Position::QB, 1), single(Position::RB, 1)], vec![]);
        let directory = PlayerDirectory::from_players(vec![
            Player::new("QB1", "QB One", Position::QB),
            Player::new("QB2", "QB Two", Position::QB),
            Player::new("RB1", "RB One", Position::RB),
        ]);
        let projections = week_one(&[("QB1", 10.0), ("QB2", 8.0), ("RB1", 12.0)]);
        let optimizer = LineupOptimizer::new(&slots, &projections, &directory);
        let bench = FreeAgentBench::empty(projections.window());

        let score = optimizer.week_score(&["QB1", "QB2", "RB1"], &bench, 1);
        assert_eq!(score, 22.0);
        assert_eq!(optimizer.season_score(&["QB1", "QB2", "RB1"], &bench), 22.0);
    }

    #[test]
    fn test_flex_uses_leftovers_after_singles() {
        let slots = RosterSlots::new(
            vec![single(Position::RB, 1), single(Position::WR, 1)],
            vec![FlexRequirement { eligible: vec![Position::RB, Position::WR], count: 1 }],
        );
        let directory = PlayerDirectory::from_players(vec![
            Player::new("rb", "Only Back", Position::RB),
            Player::new("w1", "Wideout One", Position::WR),
            Player::new("w2", "Wideout Two", Position::WR),
        ]);
        let projections = week_one(&[("rb", 9.0), ("w1", 11.0), ("w2", 5.0)]);
        let optimizer = LineupOptimizer::new(&slots, &projections, &directory);
        let bench = FreeAgentBench::empty(projections.window());

        let lineup = optimizer.week_lineup(&["rb", "w1", "w2"], &bench, 1);
        assert_eq!(lineup.total, 25.0);
        let flex = &lineup.picks[2];
        assert_eq!(flex.slot, SlotKind::Flex(vec![Position::RB, Position::WR]));
        assert_eq!(flex.player_id.as_deref(), Some("w2"));
        assert_eq!(flex.score, 5.0);
    }

    #[test]
    fn test_unfilled_slots_score_zero() {
        let slots = RosterSlots::new(
            vec![single(Position::QB, 1), single(Position::TE, 2)],
            vec![FlexRequirement { eligible: vec![Position::TE], count: 1 }],
        );
        let directory =
            PlayerDirectory::from_players(vec![Player::new("te", "Tight End", Position::TE)]);
        let projections = week_one(&[("te", 4.0)]);
        let optimizer = LineupOptimizer::new(&slots, &projections, &directory);
        let bench = FreeAgentBench::empty(projections.window());

        let lineup = optimizer.week_lineup(&["te"], &bench, 1);
        assert_eq!(lineup.total, 4.0);
        assert_eq!(lineup.picks.len(), 4);
        assert_eq!(lineup.picks.iter().filter(|p| p.player_id.is_none()).count(), 3);
    }

    #[test]
    fn test_free_agent_fills_missing_position() {
        let slots = RosterSlots::new(vec![single(Position::QB, 1), single(Position::TE, 1)], vec![]);
        let directory = PlayerDirectory::from_players(vec![
            Player::new("qb", "Starter", Position::QB),
            Player::new("fa_te", "Street Tight End", Position::TE),
        ]);
        let projections = week_one(&[("qb", 18.0), ("fa_te", 3.0)]);
        let optimizer = LineupOptimizer::new(&slots, &projections, &directory);
        let bench = FreeAgentBench::build(["fa_te"], &slots, &projections, &directory);

        assert_eq!(optimizer.week_score(&["qb"], &bench, 1), 21.0);
    }

    #[test]
    fn test_unprojected_player_is_eligible_at_zero() {
        let slots = RosterSlots::new(vec![single(Position::K, 1)], vec![]);
        let directory = PlayerDirectory::from_players(vec![
            Player::new("k", "Kicker", Position::K),
            Player::new("fa_k", "Free Kicker", Position::K),
        ]);
        let projections = week_one(&[]);
        let optimizer = LineupOptimizer::new(&slots, &projections, &directory);
        let bench = FreeAgentBench::empty(projections.window());

        let lineup = optimizer.week_lineup(&["k"], &bench, 1);
        assert_eq!(lineup.total, 0.0);
        assert_eq!(lineup.picks[0].player_id.as_deref(), Some("k"));
    }

    #[test]
    fn test_ties_go_to_lowest_player_id() {
        let slots = RosterSlots::new(
            vec![single(Position::WR, 1)],
            vec![FlexRequirement { eligible: vec![Position::RB, Position::WR], count: 1 }],
        );
        let directory = PlayerDirectory::from_players(vec![
            Player::new("200", "Late Wideout", Position::WR),
            Player::new("100", "Early Wideout", Position::WR),
            Player::new("150", "Middle Back", Position::RB),
        ]);
        let projections = week_one(&[("200", 7.0), ("100", 7.0), ("150", 7.0)]);
        let optimizer = LineupOptimizer::new(&slots, &projections, &directory);
        let bench = FreeAgentBench::empty(projections.window());

        let lineup = optimizer.week_lineup(&["200", "150", "100"], &bench, 1);
        assert_eq!(lineup.picks[0].player_id.as_deref(), Some("100"));
        assert_eq!(lineup.picks[1].player_id.as_deref(), Some("150"));

        let again = optimizer.week_lineup(&["100", "150", "200"], &bench, 1);
        assert_eq!(lineup, again);
    }

    #[test]
    fn test_unknown_positions_never_start() {
        let slots = RosterSlots::new(vec![single(Position::QB, 1)], vec![]);
        let directory = PlayerDirectory::from_players(vec![Player::new(
            "ol",
            "Offensive Lineman",
            Position::Unknown,
        )]);
        let projections = week_one(&[("ol", 50.0), ("not-in-directory", 40.0)]);
        let optimizer = LineupOptimizer::new(&slots, &projections, &directory);
        let bench = FreeAgentBench::empty(projections.window());

        assert_eq!(optimizer.week_score(&["ol", "not-in-directory"], &bench, 1), 0.0);
    }

    #[test]
    fn test_per_week_average() {
        let slots = RosterSlots::default();
        let directory = PlayerDirectory::new();
        let projections = ProjectionTable::build(WeekWindow::new(5, 17), Vec::new());
        let optimizer = LineupOptimizer::new(&slots, &projections, &directory);

        assert_eq!(optimizer.per_week(130.0), 10.0);
    }
}
