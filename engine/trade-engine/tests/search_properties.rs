//! Property tests for the trade search

use lineup_optimizer::{
    FlexRequirement, LineupOptimizer, ProjectionEntry, ProjectionTable, RosterSlots, SlotRequirement,
    WeekWindow,
};
use player_registry::{LeagueUser, Player, PlayerDirectory, Position, Roster};
use proptest::prelude::*;
use std::collections::BTreeSet;
use trade_engine::{LeagueSnapshot, SearchParams, TradeSearch};

const POSITIONS: [Position; 4] = [Position::QB, Position::RB, Position::WR, Position::TE];
const TEAMS: usize = 3;
const WINDOW: WeekWindow = WeekWindow { first: 1, last: 2 };

fn slots() -> RosterSlots {
    RosterSlots::new(
        vec![
            SlotRequirement { position: Position::QB, count: 1 },
            SlotRequirement { position: Position::RB, count: 1 },
            SlotRequirement { position: Position::WR, count: 1 },
        ],
        vec![FlexRequirement { eligible: vec![Position::RB, Position::WR, Position::TE], count: 1 }],
    )
}

/// (owner index where `TEAMS` means free agent, position index, week 1 score, week 2 score)
type GeneratedPlayer = (usize, usize, u32, Option<u32>);

fn league_strategy() -> impl Strategy<Value = Vec<GeneratedPlayer>> {
    prop::collection::vec(
        (0..=TEAMS, 0..POSITIONS.len(), 0u32..40, prop::option::of(0u32..40)),
        4..16,
    )
}

fn snapshot(players: &[GeneratedPlayer]) -> LeagueSnapshot {
    let mut directory = Vec::new();
    let mut projections = Vec::new();
    let mut rosters: Vec<Vec<String>> = vec![Vec::new(); TEAMS];

    for (i, (owner, pos, week1, week2)) in players.iter().enumerate() {
        let id = format!("p{i:02}");
        directory.push(Player::new(id.clone(), format!("Player {i}"), POSITIONS[*pos]));
        // Half-point steps keep sums exact
        projections.push(ProjectionEntry::new(id.clone(), 1, Some(*week1 as f64 / 2.0)));
        projections.push(ProjectionEntry::new(id.clone(), 2, week2.map(|s| s as f64 / 2.0)));
        if *owner < TEAMS {
            rosters[*owner].push(id);
        }
    }

    let users = (0..TEAMS).map(|t| LeagueUser::new(format!("u{t}"), format!("Team {t}"))).collect();
    let rosters = rosters.into_iter().enumerate().map(|(t, ids)| Roster::new(format!("u{t}"), ids)).collect();
    LeagueSnapshot::new(
        "L",
        users,
        rosters,
        PlayerDirectory::from_players(directory),
        ProjectionTable::build(WINDOW, projections),
    )
    .unwrap()
}

fn params(max_group_size: usize) -> SearchParams {
    SearchParams { max_group_size, excluded_positions: vec![], prune_incomplete_rosters: true }
}

fn swap(roster: &Roster, out: &str, inc: &str) -> Vec<String> {
    roster.players.iter().filter(|id| id.as_str() != out).cloned().chain(Some(inc.to_string())).collect()
}

proptest! {
    #[test]
    fn every_accepted_trade_helps_target_and_spares_counterparty(
        players in league_strategy(),
        max_group_size in 1usize..3,
    ) {
        let snapshot = snapshot(&players);
        let slots = slots();
        let bench = snapshot.bench(&slots);
        let search = TradeSearch::new(&snapshot, &slots, &bench, "u0", params(max_group_size)).unwrap();
        let results = search.run();

        prop_assert_eq!(results.stats.accepted as usize, results.rows.len());
        for row in &results.rows {
            prop_assert!(row.target_after > row.target_before);
            prop_assert!(row.counterparty_after >= row.counterparty_before);
            prop_assert!(row.counterparty_id != "u0");
            prop_assert!(!row.sends.is_empty() && row.sends.len() <= max_group_size);
            prop_assert!(!row.receives.is_empty() && row.receives.len() <= max_group_size);

            let target = snapshot.roster_of("u0").unwrap();
            let other = snapshot.roster_of(&row.counterparty_id).unwrap();
            for sent in &row.sends {
                prop_assert!(target.contains(&sent.player_id));
            }
            for received in &row.receives {
                prop_assert!(other.contains(&received.player_id));
            }
        }
        for pair in results.rows.windows(2) {
            prop_assert!(pair[0].gain() >= pair[1].gain());
        }
    }

    #[test]
    fn single_player_search_matches_brute_force(players in league_strategy()) {
        let snapshot = snapshot(&players);
        let slots = slots();
        let bench = snapshot.bench(&slots);
        let optimizer = LineupOptimizer::new(&slots, &snapshot.projections, &snapshot.directory);
        let score = |ids: &[String]| {
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            optimizer.season_score(&refs, &bench)
        };
        let complete = |ids: &[String]| {
            slots.is_complete(ids.iter().map(|id| snapshot.directory.position_of(id)))
        };

        let target = snapshot.roster_of("u0").unwrap();
        let target_ids: Vec<String> = target.players.iter().cloned().collect();
        let target_before = score(&target_ids);

        let mut expected = BTreeSet::new();
        for other in snapshot.counterparties("u0") {
            let other_ids: Vec<String> = other.players.iter().cloned().collect();
            let other_before = score(&other_ids);
            for out in &target.players {
                for inc in &other.players {
                    let proposed_target = swap(target, out, inc);
                    let proposed_other = swap(other, inc, out);
                    if !complete(&proposed_target) || !complete(&proposed_other) {
                        continue;
                    }
                    if score(&proposed_target) > target_before && score(&proposed_other) >= other_before {
                        expected.insert((other.owner_id.clone(), out.clone(), inc.clone()));
                    }
                }
            }
        }

        let search = TradeSearch::new(&snapshot, &slots, &bench, "u0", params(1)).unwrap();
        let found: BTreeSet<(String, String, String)> = search
            .run_parallel()
            .rows
            .into_iter()
            .map(|row| {
                (row.counterparty_id.clone(), row.sends[0].player_id.clone(), row.receives[0].player_id.clone())
            })
            .collect();

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn candidate_iterator_is_lazy_and_restartable(players in league_strategy(), take in 0usize..20) {
        let snapshot = snapshot(&players);
        let slots = slots();
        let bench = snapshot.bench(&slots);
        let search = TradeSearch::new(&snapshot, &slots, &bench, "u0", params(2)).unwrap();

        prop_assert_eq!(search.candidates().count() as u64, search.total_candidates());

        let partial: Vec<_> = search.candidates().take(take).collect();
        let again: Vec<_> = search.candidates().take(take).collect();
        prop_assert_eq!(&partial, &again);
        for (expected, candidate) in partial.iter().enumerate() {
            prop_assert_eq!(candidate.sequence, expected as u64);
        }
    }
}

#[test]
fn excluded_positions_leave_both_sides_out_of_groups() {
    let slots = RosterSlots::new(
        vec![
            SlotRequirement { position: Position::WR, count: 1 },
            SlotRequirement { position: Position::K, count: 1 },
        ],
        vec![],
    );
    let window = WeekWindow::new(1, 1);
    let directory = PlayerDirectory::from_players(vec![
        Player::new("t1", "Target Receiver", Position::WR),
        Player::new("t2", "Target Kicker", Position::K),
        Player::new("o1", "Other Receiver", Position::WR),
        Player::new("o2", "Other Kicker", Position::K),
        Player::new("fa", "Free Kicker", Position::K),
    ]);
    let projections = vec![
        ProjectionEntry::new("t1", 1, Some(5.0)),
        ProjectionEntry::new("t2", 1, Some(3.0)),
        ProjectionEntry::new("o1", 1, Some(6.0)),
        ProjectionEntry::new("o2", 1, Some(2.0)),
        ProjectionEntry::new("fa", 1, Some(4.0)),
    ];
    let snapshot = LeagueSnapshot::new(
        "L",
        vec![LeagueUser::new("t", "Target"), LeagueUser::new("o", "Other")],
        vec![Roster::new("t", ["t1", "t2"]), Roster::new("o", ["o1", "o2"])],
        directory,
        ProjectionTable::build(window, projections),
    )
    .unwrap();
    let bench = snapshot.bench(&slots);
    let params = SearchParams {
        max_group_size: 2,
        excluded_positions: vec![Position::K],
        prune_incomplete_rosters: true,
    };
    let search = TradeSearch::new(&snapshot, &slots, &bench, "t", params).unwrap();

    let candidates: Vec<(Vec<&str>, Vec<&str>)> =
        search.candidates().map(|c| (c.outgoing, c.incoming)).collect();
    assert_eq!(candidates, vec![(vec!["t1"], vec!["o1"])]);
    assert_eq!(search.total_candidates(), 1);

    // The free agent kicker still backfills: 5 (t1) + 4 (fa) rather than 5 + 3
    assert_eq!(search.target_baseline(), 9.0);

    let results = search.run();
    assert_eq!(results.stats.candidates, 1);
    // Target gains 6 + 4 = 10, but Other drops from 10 to 5 + 4 = 9
    assert_eq!(results.stats.rejected, 1);
    assert!(results.rows.is_empty());
}
