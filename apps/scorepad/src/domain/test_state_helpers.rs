//! Test-only builders for domain unit tests.

use std::collections::BTreeMap;

use crate::domain::game::{Direction, Game};
use crate::domain::player::{Player, PlayerId};
use crate::domain::round::{BetResult, Round};

/// Players with deterministic ids equal to their names.
pub fn roster(names: &[&str]) -> Vec<Player> {
    names
        .iter()
        .map(|n| Player {
            id: PlayerId::from(*n),
            name: n.to_string(),
        })
        .collect()
}

/// A closed round built directly from `(player, bet, result)` rows.
pub fn closed_round(number_of_cards: u32, rows: &[(&str, u32, BetResult)]) -> Round {
    let mut bets = BTreeMap::new();
    let mut results = BTreeMap::new();
    for (id, bet, result) in rows {
        bets.insert(PlayerId::from(*id), *bet);
        results.insert(PlayerId::from(*id), *result);
    }
    Round::from_parts(number_of_cards, 0, bets, results, true)
}

/// A forward game over `names` holding `rounds` as its closed history.
pub fn game_with_rounds(names: &[&str], rounds: Vec<Round>) -> Game {
    let next = rounds.len() as u32 + 1;
    Game::from_parts(
        "game-test".to_string(),
        roster(names),
        rounds,
        None,
        Direction::Forward,
        0,
        next,
        false,
    )
}

/// Play the current round to a close: everyone bets 0, the first player fails.
pub fn play_out_current_round(game: &mut Game) {
    let players = game.players().to_vec();
    let round = game
        .current_round_mut()
        .expect("test game should have an open round");
    for p in &players {
        round.place_bet(&players, &p.id, 0).expect("roster member");
    }
    for (idx, p) in players.iter().enumerate() {
        let result = if idx == 0 {
            BetResult::Failure
        } else {
            BetResult::Success
        };
        round
            .record_result(&players, &p.id, result)
            .expect("roster member");
    }
    assert!(round.can_be_closed(&players));
    game.end_round();
}
