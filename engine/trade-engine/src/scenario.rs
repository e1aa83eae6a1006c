//! Score a single hand-picked trade

use crate::error::{Result, TradeEngineError};
use crate::models::{CounterpartySelector, ScenarioOutcome};
use crate::search::apply_swap;
use crate::snapshot::LeagueSnapshot;
use lineup_optimizer::{FreeAgentBench, LineupOptimizer, RosterSlots};
use player_registry::{PlayerId, Roster};
use tracing::info;

/// Evaluate one trade between the target and a chosen counterparty
///
/// Unlike the search, an incomplete proposed roster is still scored; the
/// outcome reports it through `rosters_complete`.
pub fn evaluate_scenario(
    snapshot: &LeagueSnapshot,
    slots: &RosterSlots,
    bench: &FreeAgentBench,
    target_user_id: &str,
    counterparty: &CounterpartySelector,
    outgoing: &[PlayerId],
    incoming: &[PlayerId],
) -> Result<ScenarioOutcome> {
    let target = snapshot.roster_of(target_user_id)?;
    let other = snapshot.resolve_counterparty(counterparty)?;
    if other.owner_id == target.owner_id {
        return Err(TradeEngineError::CounterpartyNotFound { selector: counterparty.to_string() });
    }

    let outgoing = trade_group(target, outgoing, "outgoing")?;
    let incoming = trade_group(other, incoming, "incoming")?;

    let optimizer = LineupOptimizer::new(slots, &snapshot.projections, &snapshot.directory);
    let target_players: Vec<&str> = target.players.iter().map(String::as_str).collect();
    let other_players: Vec<&str> = other.players.iter().map(String::as_str).collect();
    let proposed_target = apply_swap(target, &outgoing, &incoming);
    let proposed_other = apply_swap(other, &incoming, &outgoing);

    let is_complete =
        |players: &[&str]| slots.is_complete(players.iter().map(|id| snapshot.directory.position_of(id)));
    let rosters_complete = is_complete(&proposed_target) && is_complete(&proposed_other);

    let score = |players: &[&str]| optimizer.per_week(optimizer.season_score(players, bench));
    let outcome = ScenarioOutcome {
        target_before: score(&target_players),
        target_after: score(&proposed_target),
        counterparty_before: score(&other_players),
        counterparty_after: score(&proposed_other),
        counterparty_display_name: snapshot.display_name(&other.owner_id).to_string(),
        rosters_complete,
    };

    info!(
        "Scenario {} -> {}: target {:.2} -> {:.2}, counterparty {:.2} -> {:.2}",
        snapshot.display_name(&target.owner_id),
        outcome.counterparty_display_name,
        outcome.target_before,
        outcome.target_after,
        outcome.counterparty_before,
        outcome.counterparty_after
    );
    Ok(outcome)
}

/// Validate a trade group against the roster it comes from
fn trade_group<'r>(roster: &'r Roster, ids: &[PlayerId], side: &'static str) -> Result<Vec<&'r str>> {
    if ids.is_empty() {
        return Err(TradeEngineError::EmptyTradeGroup { side });
    }
    let mut group: Vec<&'r str> = Vec::with_capacity(ids.len());
    for id in ids {
        let owned = roster.players.get(id).ok_or_else(|| TradeEngineError::PlayerNotOnRoster {
            player_id: id.clone(),
            owner_id: roster.owner_id.clone(),
        })?;
        if !group.contains(&owned.as_str()) {
            group.push(owned.as_str());
        }
    }
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_optimizer::{ProjectionEntry, ProjectionTable, SlotRequirement, WeekWindow};
    use player_registry::{LeagueUser, Player, PlayerDirectory, Position};

    fn slots() -> RosterSlots {
        RosterSlots::new(
            vec![
                SlotRequirement { position: Position::QB, count: 1 },
                SlotRequirement { position: Position::WR, count: 1 },
            ],
            vec![],
        )
    }

    fn snapshot() -> LeagueSnapshot {
        let directory = PlayerDirectory::from_players(vec![
            Player::new("A", "Alpha", Position::QB),
            Player::new("B", "Bravo", Position::QB),
            Player::new("C", "Charlie", Position::WR),
            Player::new("D", "Delta", Position::WR),
        ]);
        let projections = ProjectionTable::build(
            WeekWindow::new(1, 1),
            vec![
                ProjectionEntry::new("A", 1, Some(5.0)),
                ProjectionEntry::new("B", 1, Some(3.0)),
                ProjectionEntry::new("C", 1, Some(4.0)),
                ProjectionEntry::new("D", 1, Some(6.0)),
            ],
        );
        LeagueSnapshot::new(
            "L",
            vec![LeagueUser::new("t", "Target"), LeagueUser::new("o", "Other")],
            vec![Roster::new("t", ["A", "B"]), Roster::new("o", ["C", "D"])],
            directory,
            projections,
        )
        .unwrap()
    }

    fn ids(values: &[&str]) -> Vec<PlayerId> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scenario_scores_both_sides() {
        let snapshot = snapshot();
        let slots = slots();
        let bench = snapshot.bench(&slots);
        let outcome = evaluate_scenario(
            &snapshot,
            &slots,
            &bench,
            "t",
            &CounterpartySelector::DisplayName("Other".to_string()),
            &ids(&["B"]),
            &ids(&["D"]),
        )
        .unwrap();

        assert_eq!(outcome.target_before, 5.0);
        assert_eq!(outcome.target_after, 11.0);
        assert_eq!(outcome.counterparty_before, 6.0);
        assert_eq!(outcome.counterparty_after, 7.0);
        assert_eq!(outcome.counterparty_display_name, "Other");
        assert!(outcome.rosters_complete);
        assert!(outcome.is_beneficial());
    }

    #[test]
    fn test_incomplete_scenario_is_still_scored() {
        let snapshot = snapshot();
        let slots = slots();
        let bench = snapshot.bench(&slots);
        // Target gives away both quarterbacks
        let outcome = evaluate_scenario(
            &snapshot,
            &slots,
            &bench,
            "t",
            &CounterpartySelector::UserId("o".to_string()),
            &ids(&["A", "B"]),
            &ids(&["C"]),
        )
        .unwrap();

        assert!(!outcome.rosters_complete);
        assert_eq!(outcome.target_after, 4.0);
    }

    #[test]
    fn test_scenario_input_errors() {
        let snapshot = snapshot();
        let slots = slots();
        let bench = snapshot.bench(&slots);
        let other = CounterpartySelector::UserId("o".to_string());

        let err = evaluate_scenario(&snapshot, &slots, &bench, "t", &other, &[], &ids(&["C"]))
            .unwrap_err();
        assert!(matches!(err, TradeEngineError::EmptyTradeGroup { side: "outgoing" }));

        let err = evaluate_scenario(&snapshot, &slots, &bench, "t", &other, &ids(&["C"]), &ids(&["D"]))
            .unwrap_err();
        assert!(
            matches!(err, TradeEngineError::PlayerNotOnRoster { player_id, owner_id } if player_id == "C" && owner_id == "t")
        );

        let itself = CounterpartySelector::UserId("t".to_string());
        let err = evaluate_scenario(&snapshot, &slots, &bench, "t", &itself, &ids(&["A"]), &ids(&["B"]))
            .unwrap_err();
        assert!(matches!(err, TradeEngineError::CounterpartyNotFound { .. }));
    }
}
