//! Exhaustive trade search
//!
//! For every counterparty, every group of 1..=max players the target could
//! send is paired with every group of 1..=max players it could receive. Each
//! pairing is applied to copies of both rosters, checked for completeness and
//! scored with the lineup optimizer against the same free agent bench. A trade
//! is kept when the target strictly improves and the counterparty does not
//! get worse.

use crate::combinations::Combinations;
use crate::error::{Result, TradeEngineError};
use crate::models::{SearchProgress, SearchStats, TradeRow};
use crate::snapshot::LeagueSnapshot;
use lineup_optimizer::{FreeAgentBench, LineupOptimizer, RosterSlots};
use player_registry::{Position, Roster};
use rayon::iter::{ParallelBridge, ParallelIterator};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Knobs for one search run
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub max_group_size: usize,
    pub excluded_positions: Vec<Position>,
    pub prune_incomplete_rosters: bool,
}

/// One side of a potential trade with its score before any trade
#[derive(Debug)]
struct Side<'a> {
    roster: &'a Roster,
    display_name: &'a str,
    /// Players that may be part of a trade group
    eligible: Vec<&'a str>,
    /// Season total before the trade
    baseline: f64,
}

/// A proposed exchange between the target and one counterparty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeCandidate<'a> {
    /// Position in enumeration order, used to keep ties stable
    pub sequence: u64,
    /// Index into the search's counterparty list
    pub counterparty: usize,
    /// Players the target sends
    pub outgoing: Vec<&'a str>,
    /// Players the target receives
    pub incoming: Vec<&'a str>,
}

/// A candidate that passed the benefit test
#[derive(Debug, Clone)]
pub struct AcceptedTrade {
    pub sequence: u64,
    /// Target improvement as a season total
    pub season_gain: f64,
    pub row: TradeRow,
}

/// Outcome of scoring one candidate
#[derive(Debug, Clone)]
pub enum Evaluation {
    /// A proposed roster cannot fill its single-position slots
    Pruned,
    Rejected,
    Accepted(AcceptedTrade),
}

/// Accepted rows (best first) plus counters
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub rows: Vec<TradeRow>,
    pub stats: SearchStats,
}

/// A trade search for one target roster against the rest of the league
///
/// Baselines are computed once in `new`; everything afterwards only reads
/// shared state, so candidates can be evaluated from any thread.
pub struct TradeSearch<'a> {
    snapshot: &'a LeagueSnapshot,
    optimizer: LineupOptimizer<'a>,
    bench: &'a FreeAgentBench,
    target: Side<'a>,
    counterparties: Vec<Side<'a>>,
    max_group_size: usize,
    prune_incomplete: bool,
}

impl<'a> TradeSearch<'a> {
    pub fn new(
        snapshot: &'a LeagueSnapshot,
        slots: &'a RosterSlots,
        bench: &'a FreeAgentBench,
        target_user_id: &str,
        params: SearchParams,
    ) -> Result<Self> {
        if params.max_group_size == 0 {
            return Err(TradeEngineError::InvalidGroupSize { size: params.max_group_size });
        }

        let optimizer = LineupOptimizer::new(slots, &snapshot.projections, &snapshot.directory);
        let excluded = &params.excluded_positions;
        let side = |roster: &'a Roster| -> Side<'a> {
            let players: Vec<&'a str> = roster.players.iter().map(String::as_str).collect();
            let eligible = players
                .iter()
                .copied()
                .filter(|id| !excluded.contains(&snapshot.directory.position_of(id)))
                .collect();
            Side {
                roster,
                display_name: snapshot.display_name(&roster.owner_id),
                eligible,
                baseline: optimizer.season_score(&players, bench),
            }
        };

        let target = side(snapshot.roster_of(target_user_id)?);
        let counterparties: Vec<Side<'a>> =
            snapshot.counterparties(&target.roster.owner_id).map(side).collect();

        info!(
            "Trade search for {}: baseline {:.2}/week, {} eligible players, {} counterparties, max group {}",
            target.display_name,
            optimizer.per_week(target.baseline),
            target.eligible.len(),
            counterparties.len(),
            params.max_group_size
        );

        Ok(Self {
            snapshot,
            optimizer,
            bench,
            target,
            counterparties,
            max_group_size: params.max_group_size,
            prune_incomplete: params.prune_incomplete_rosters,
        })
    }

    /// Target display name
    pub fn target_name(&self) -> &'a str {
        self.target.display_name
    }

    /// Target's current score as a per-week average
    pub fn target_baseline(&self) -> f64 {
        self.optimizer.per_week(self.target.baseline)
    }

    pub fn counterparty_count(&self) -> usize {
        self.counterparties.len()
    }

    /// Number of candidates `candidates()` will yield
    pub fn total_candidates(&self) -> u64 {
        let outgoing = Combinations::count_for(self.target.eligible.len(), self.max_group_size);
        let incoming = self
            .counterparties
            .iter()
            .map(|cp| Combinations::count_for(cp.eligible.len(), self.max_group_size))
            .fold(0u64, u64::saturating_add);
        outgoing.saturating_mul(incoming)
    }

    /// Lazily enumerate every candidate pairing
    ///
    /// Each call starts over from the first candidate; dropping the iterator
    /// part way through is fine.
    pub fn candidates(&self) -> Candidates<'_, 'a> {
        Candidates {
            search: self,
            outgoing: Combinations::new(self.target.eligible.len(), self.max_group_size),
            current: None,
            counterparty: 0,
            incoming: None,
            sequence: 0,
        }
    }

    /// Apply one candidate to copies of both rosters and score them
    pub fn evaluate(&self, candidate: &TradeCandidate<'a>) -> Evaluation {
        let counterparty = &self.counterparties[candidate.counterparty];
        let proposed_target = apply_swap(self.target.roster, &candidate.outgoing, &candidate.incoming);
        let proposed_other = apply_swap(counterparty.roster, &candidate.incoming, &candidate.outgoing);

        if self.prune_incomplete
            && !(self.is_complete(&proposed_target) && self.is_complete(&proposed_other))
        {
            return Evaluation::Pruned;
        }

        let target_after = self.optimizer.season_score(&proposed_target, self.bench);
        if target_after <= self.target.baseline {
            return Evaluation::Rejected;
        }
        let other_after = self.optimizer.season_score(&proposed_other, self.bench);
        if other_after < counterparty.baseline {
            return Evaluation::Rejected;
        }

        let per_week = |total: f64| self.optimizer.per_week(total);
        let row = TradeRow {
            sends: candidate.outgoing.iter().map(|id| self.snapshot.player(id)).collect(),
            receives: candidate.incoming.iter().map(|id| self.snapshot.player(id)).collect(),
            counterparty_id: counterparty.roster.owner_id.clone(),
            counterparty_name: counterparty.display_name.to_string(),
            target_before: per_week(self.target.baseline),
            target_after: per_week(target_after),
            counterparty_before: per_week(counterparty.baseline),
            counterparty_after: per_week(other_after),
        };
        Evaluation::Accepted(AcceptedTrade {
            sequence: candidate.sequence,
            season_gain: target_after - self.target.baseline,
            row,
        })
    }

    /// Evaluate every candidate on the current thread
    pub fn run(&self) -> SearchResults {
        self.run_with_progress(&mut |_| {})
    }

    /// Evaluate every candidate on the current thread, reporting progress
    ///
    /// A progress update is sent whenever the outgoing group or the
    /// counterparty changes, and once at the end.
    pub fn run_with_progress(&self, progress: &mut dyn FnMut(&SearchProgress)) -> SearchResults {
        let total = self.total_candidates();
        let mut stats = SearchStats::default();
        let mut accepted = Vec::new();
        let mut last_group: Option<(usize, Vec<&'a str>)> = None;

        for candidate in self.candidates() {
            let group_changed = last_group
                .as_ref()
                .map_or(true, |(cp, out)| *cp != candidate.counterparty || *out != candidate.outgoing);
            if group_changed {
                let update = SearchProgress {
                    completed: stats.candidates,
                    total,
                    message: self.describe(&candidate),
                };
                debug!("{} ({:.1}%)", update.message, update.fraction() * 100.0);
                progress(&update);
                last_group = Some((candidate.counterparty, candidate.outgoing.clone()));
            }

            stats.candidates += 1;
            match self.evaluate(&candidate) {
                Evaluation::Pruned => stats.pruned += 1,
                Evaluation::Rejected => stats.rejected += 1,
                Evaluation::Accepted(trade) => {
                    stats.accepted += 1;
                    accepted.push(trade);
                }
            }
        }

        progress(&SearchProgress {
            completed: stats.candidates,
            total,
            message: format!("Evaluated {} candidates", stats.candidates),
        });
        self.finish(accepted, stats)
    }

    /// Evaluate candidates on the rayon pool; results match `run`
    pub fn run_parallel(&self) -> SearchResults {
        let candidates = AtomicU64::new(0);
        let pruned = AtomicU64::new(0);
        let rejected = AtomicU64::new(0);

        let accepted: Vec<AcceptedTrade> = self
            .candidates()
            .par_bridge()
            .filter_map(|candidate| {
                candidates.fetch_add(1, Ordering::Relaxed);
                match self.evaluate(&candidate) {
                    Evaluation::Pruned => {
                        pruned.fetch_add(1, Ordering::Relaxed);
                        None
                    }
                    Evaluation::Rejected => {
                        rejected.fetch_add(1, Ordering::Relaxed);
                        None
                    }
                    Evaluation::Accepted(trade) => Some(trade),
                }
            })
            .collect();

        let stats = SearchStats {
            candidates: candidates.into_inner(),
            pruned: pruned.into_inner(),
            rejected: rejected.into_inner(),
            accepted: accepted.len() as u64,
        };
        self.finish(accepted, stats)
    }

    /// Sort best first; equal gains keep enumeration order
    fn finish(&self, mut accepted: Vec<AcceptedTrade>, stats: SearchStats) -> SearchResults {
        accepted.sort_by(|a, b| {
            b.season_gain.total_cmp(&a.season_gain).then_with(|| a.sequence.cmp(&b.sequence))
        });
        info!(
            "Trade search for {} finished: {} candidates, {} pruned, {} rejected, {} accepted",
            self.target.display_name, stats.candidates, stats.pruned, stats.rejected, stats.accepted
        );
        SearchResults { rows: accepted.into_iter().map(|t| t.row).collect(), stats }
    }

    fn is_complete(&self, players: &[&str]) -> bool {
        self.optimizer
            .slots()
            .is_complete(players.iter().map(|id| self.snapshot.directory.position_of(id)))
    }

    fn describe(&self, candidate: &TradeCandidate<'a>) -> String {
        let names: Vec<String> =
            candidate.outgoing.iter().map(|id| self.snapshot.directory.label_of(id)).collect();
        format!(
            "Evaluating {} to {}",
            names.join(", "),
            self.counterparties[candidate.counterparty].display_name
        )
    }
}

/// Roster after sending `remove` away and taking `add` in
pub(crate) fn apply_swap<'r>(roster: &'r Roster, remove: &[&str], add: &[&'r str]) -> Vec<&'r str> {
    let mut players: Vec<&'r str> = roster
        .players
        .iter()
        .map(String::as_str)
        .filter(|id| !remove.contains(id))
        .collect();
    players.extend(add.iter().copied());
    players
}

/// Lazy sequence of trade candidates, see [`TradeSearch::candidates`]
///
/// Order: outgoing group, then counterparty, then incoming group.
pub struct Candidates<'s, 'a> {
    search: &'s TradeSearch<'a>,
    outgoing: Combinations,
    current: Option<Vec<&'a str>>,
    counterparty: usize,
    incoming: Option<Combinations>,
    sequence: u64,
}

impl<'a> Iterator for Candidates<'_, 'a> {
    type Item = TradeCandidate<'a>;

    fn next(&mut self) -> Option<TradeCandidate<'a>> {
        let search = self.search;
        loop {
            if self.current.is_none() {
                let indices = self.outgoing.next()?;
                self.current = Some(indices.iter().map(|&i| search.target.eligible[i]).collect());
                self.counterparty = 0;
                self.incoming = None;
            }

            let Some(side) = search.counterparties.get(self.counterparty) else {
                self.current = None;
                continue;
            };

            let incoming = self
                .incoming
                .get_or_insert_with(|| Combinations::new(side.eligible.len(), search.max_group_size));
            match incoming.next() {
                Some(indices) => {
                    let candidate = TradeCandidate {
                        sequence: self.sequence,
                        counterparty: self.counterparty,
                        outgoing: self.current.clone().unwrap_or_default(),
                        incoming: indices.iter().map(|&i| side.eligible[i]).collect(),
                    };
                    self.sequence += 1;
                    return Some(candidate);
                }
                None => {
                    self.counterparty += 1;
                    self.incoming = None;
                }
            }
        }
    }
}
