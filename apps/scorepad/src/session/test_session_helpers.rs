//! Test-only helpers for driving a session through its phases.

use crate::domain::{BetResult, PlayerId};
use crate::session::states::{
    GameSetup, Idle, ResultsDisplay, RoundEnded, RoundInProgress, RoundSetup,
};
use crate::session::{Session, State};
use crate::store::MemoryStore;

macro_rules! expect_variant {
    ($fn_name:ident, $variant:ident) => {
        pub fn $fn_name(state: State<'_>) -> $variant<'_> {
            match state {
                State::$variant(handle) => handle,
                other => panic!(
                    "expected {} but session is in {}",
                    stringify!($variant),
                    other.phase()
                ),
            }
        }
    };
}

expect_variant!(idle, Idle);
expect_variant!(game_setup, GameSetup);
expect_variant!(round_setup, RoundSetup);
expect_variant!(round_in_progress, RoundInProgress);
expect_variant!(round_ended, RoundEnded);
expect_variant!(results_display, ResultsDisplay);

/// Session on a fresh memory store; the store handle shares its slot.
pub fn memory_session() -> (Session, MemoryStore) {
    let store = MemoryStore::new();
    (Session::new(store.clone()), store)
}

/// Session in `RoundSetup` for the first round with the given players.
pub fn session_with_players(names: &[&str]) -> (Session, MemoryStore, Vec<PlayerId>) {
    let (mut session, store) = memory_session();
    let state = idle(session.state().unwrap()).start_game().unwrap();
    let mut setup = game_setup(state);
    let ids = names.iter().map(|n| setup.add_player(n).unwrap()).collect();
    round_setup(setup.start_game().unwrap());
    (session, store, ids)
}

/// From `RoundSetup`, play the round to `ResultsDisplay`: everyone bets 0,
/// the first player in turn order fails.
pub fn play_round_to_results(session: &mut Session) {
    let mut setup = round_setup(session.state().unwrap());
    let order: Vec<PlayerId> = {
        use crate::session::states::RoundScoped;
        setup
            .players_order()
            .unwrap()
            .into_iter()
            .map(|p| p.id.clone())
            .collect()
    };
    for id in &order {
        setup.add_bet(id, 0).unwrap();
    }
    let playing = round_in_progress(setup.start_round().unwrap());
    let mut ended = round_ended(playing.end_round().unwrap());
    for (idx, id) in order.iter().enumerate() {
        let result = if idx == 0 {
            BetResult::Failure
        } else {
            BetResult::Success
        };
        ended.register_result(id, result).unwrap();
    }
    results_display(ended.submit_results().unwrap());
}
