//! Property tests for the round lifecycle and scoring (pure domain).
//!
//! - Hand sizes climb by one per forward round starting at one card.
//! - After the flip, every round is smaller than the one before it until a
//!   one-card round ends the game.
//! - The last player's forbidden bet never changes the bets.

use proptest::prelude::*;
use scorepad_test_support::proptest_config;

use crate::domain::game::Game;
use crate::domain::player::PlayerId;
use crate::domain::round::{BetOutcome, BetResult, Round};
use crate::domain::rules::points_for;
use crate::domain::test_state_helpers::{closed_round, play_out_current_round, roster};

fn game_with(player_count: usize) -> Game {
    let mut game = Game::new();
    for i in 0..player_count {
        game.add_player(&format!("p{i}"));
    }
    game
}

proptest! {
    #![proptest_config(proptest_config())]

    /// After N forward rounds the next hand size is N + 1.
    #[test]
    fn prop_forward_trajectory(players in 2usize..=6, rounds in 1u32..=15) {
        let mut game = game_with(players);
        for k in 1..=rounds {
            let round = game.start_round();
            prop_assert_eq!(round.number_of_cards(), k);
            prop_assert_eq!(round.first_player(), (k as usize - 1) % players);
            play_out_current_round(&mut game);
            prop_assert!(!game.is_game_over());
        }
        prop_assert_eq!(game.next_number_of_cards(), rounds + 1);
    }

    /// Once the return starts hand sizes shrink and the game ends on one card.
    #[test]
    fn prop_return_trajectory(players in 2usize..=6, peak in 1u32..=12) {
        let mut game = game_with(players);
        for _ in 0..peak {
            game.start_round();
            play_out_current_round(&mut game);
        }
        prop_assert!(game.start_return());

        let mut sizes = Vec::new();
        while !game.is_game_over() {
            prop_assert!(sizes.len() <= peak as usize, "game must end");
            let size = game.start_round().number_of_cards();
            sizes.push(size);
            play_out_current_round(&mut game);
        }

        let expected: Vec<u32> = (1..=peak).rev().collect();
        prop_assert_eq!(&sizes, &expected);
        prop_assert!(sizes.windows(2).all(|w| w[0] > w[1]));
        prop_assert!(game.next_number_of_cards() >= 1);
    }

    /// The forbidden last bet is rejected without touching the bets; any
    /// other value is recorded.
    #[test]
    fn prop_last_bet_rule(
        (cards, first, second, last) in (1u32..=13).prop_flat_map(|cards| {
            (Just(cards), 0..=cards, 0..=cards, 0..=cards + 2)
        }),
    ) {
        let players = roster(&["a", "b", "c"]);
        let mut round = Round::new(cards, 0);
        round.place_bet(&players, &players[0].id, first).unwrap();
        round.place_bet(&players, &players[1].id, second).unwrap();

        let before = round.bets().clone();
        let forbidden = cards.checked_sub(first + second);
        let outcome = round.place_bet(&players, &players[2].id, last).unwrap();

        if forbidden == Some(last) {
            prop_assert_eq!(outcome, BetOutcome::Rejected);
            prop_assert_eq!(round.bets(), &before);
        } else {
            prop_assert_eq!(outcome, BetOutcome::Recorded);
            prop_assert_eq!(round.bet_for(&players[2].id), Some(last));
            let total: u32 = round.bets().values().sum();
            prop_assert_ne!(total, cards);
        }
    }

    /// Points depend only on the (bet, result) pair.
    #[test]
    fn prop_points_formula(bet in 0u32..=20, success in any::<bool>()) {
        let result = if success { BetResult::Success } else { BetResult::Failure };
        let round = closed_round(20, &[("a", bet, result), ("b", 0, BetResult::Failure)]);
        let points = round.points().unwrap();
        let expected = if success { bet * 2 + 10 } else { 0 };
        prop_assert_eq!(points[&PlayerId::from("a")], expected);
        prop_assert_eq!(points_for(bet, success), Some(expected));
    }
}
