use std::collections::BTreeMap;

use crate::domain::player::PlayerId;
use crate::domain::round::BetResult::{Failure, Success};
use crate::domain::round::Round;
use crate::domain::scoring::{placings, round_points};
use crate::domain::test_state_helpers::{closed_round, game_with_rounds};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn success_scores_double_bet_plus_ten() {
    let round = closed_round(5, &[("a", 3, Success), ("b", 1, Failure)]);
    let points = round_points(&round).unwrap();
    assert_eq!(points[&PlayerId::from("a")], 16);
    assert_eq!(points[&PlayerId::from("b")], 0);
}

#[test]
fn failure_scores_zero_for_any_bet() {
    for bet in [0, 1, 4, 12] {
        let round = closed_round(12, &[("a", bet, Failure)]);
        assert_eq!(round_points(&round).unwrap()[&PlayerId::from("a")], 0);
    }
}

#[test]
fn zero_bet_success_still_earns_bonus() {
    let round = closed_round(2, &[("a", 0, Success), ("b", 1, Failure)]);
    assert_eq!(round.points().unwrap()[&PlayerId::from("a")], 10);
}

#[test]
fn open_round_has_no_points() {
    let round = Round::new(3, 0);
    let err = round_points(&round).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RoundNotOver, _)
    ));
}

#[test]
fn success_without_bet_is_rejected() {
    let results = [(PlayerId::from("b"), Success)].into_iter().collect();
    let round = Round::from_parts(2, 0, BTreeMap::new(), results, true);
    let err = round_points(&round).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::MissingBet, _)));
}

#[test]
fn placings_sum_over_rounds_and_sort_descending() {
    // Round 1: a 12, b 0, c 10. Round 2: a 0, b 14, c 10.
    let rounds = vec![
        closed_round(1, &[("a", 1, Success), ("b", 0, Failure), ("c", 0, Success)]),
        closed_round(2, &[("a", 2, Failure), ("b", 2, Success), ("c", 0, Success)]),
    ];
    let game = game_with_rounds(&["a", "b", "c"], rounds);

    let placings = placings(&game).unwrap();
    let totals: Vec<(&str, u32)> = placings
        .iter()
        .map(|p| (p.player_id.as_str(), p.points))
        .collect();
    assert_eq!(totals, [("c", 20), ("b", 14), ("a", 12)]);
    assert!(placings.windows(2).all(|w| w[0].points > w[1].points));
    assert_eq!(
        placings.iter().map(|p| p.rank).collect::<Vec<_>>(),
        [1, 2, 3]
    );
}

#[test]
fn placings_cover_overlapping_player_sets() {
    // "d" only played the first round and has since left the roster.
    let rounds = vec![
        closed_round(1, &[("a", 0, Failure), ("d", 1, Success)]),
        closed_round(2, &[("a", 1, Success), ("b", 0, Failure)]),
    ];
    let game = game_with_rounds(&["a", "b"], rounds);

    let placings = placings(&game).unwrap();
    let totals: Vec<(&str, u32)> = placings
        .iter()
        .map(|p| (p.player_id.as_str(), p.points))
        .collect();
    assert_eq!(totals, [("a", 12), ("d", 12), ("b", 0)]);
    assert_eq!(placings[1].name, None);
    assert_eq!(placings[0].name.as_deref(), Some("a"));
}

#[test]
fn ties_keep_roster_order_and_share_rank() {
    let rounds = vec![closed_round(
        1,
        &[("c", 0, Success), ("a", 0, Success), ("b", 1, Failure)],
    )];
    let game = game_with_rounds(&["b", "c", "a"], rounds);

    let placings = placings(&game).unwrap();
    let order: Vec<&str> = placings.iter().map(|p| p.player_id.as_str()).collect();
    assert_eq!(order, ["c", "a", "b"]);
    assert_eq!(
        placings.iter().map(|p| p.rank).collect::<Vec<_>>(),
        [1, 1, 3]
    );
}

#[test]
fn no_closed_rounds_means_no_placings() {
    let game = game_with_rounds(&["a", "b"], Vec::new());
    assert!(game.placings().unwrap().is_empty());
}

#[test]
fn max_bet_success_is_a_score_overflow() {
    let round = closed_round(3, &[("a", u32::MAX, Success), ("b", 1, Failure)]);
    let err = round_points(&round).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::ScoreOverflow, _)
    ));
}

#[test]
fn totals_that_overflow_are_rejected() {
    // Each round alone scores u32::MAX - 1.
    let bet = (u32::MAX - 10) / 2;
    let rounds = vec![
        closed_round(1, &[("a", bet, Success), ("b", 0, Failure)]),
        closed_round(2, &[("a", bet, Success), ("b", 0, Failure)]),
    ];
    let game = game_with_rounds(&["a", "b"], rounds);

    assert_eq!(round_points(&game.rounds()[0]).unwrap()[&PlayerId::from("a")], u32::MAX - 1);
    let err = placings(&game).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::ScoreOverflow, _)
    ));
}
