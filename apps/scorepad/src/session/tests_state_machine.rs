use crate::domain::{BetOutcome, BetResult, Direction, PlayerId};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::session::states::{GameScoped, RoundScoped};
use crate::session::test_session_helpers::{
    game_setup, idle, memory_session, play_round_to_results, results_display, round_ended,
    round_in_progress, round_setup, session_with_players,
};
use crate::session::{Phase, Session};
use crate::store::MemoryStore;

#[test]
fn starting_a_game_pushes_history_and_persists() {
    let (mut session, store) = memory_session();
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(store.save_count(), 0);

    let state = idle(session.state().unwrap()).start_game().unwrap();
    assert_eq!(state.phase(), Phase::GameSetup);

    assert_eq!(session.app().history(), &[Phase::Idle]);
    assert!(session.game().is_some());
    assert_eq!(store.save_count(), 1);
    assert!(store.contents().unwrap().contains("\"currentState\":\"game-setup\""));
}

#[test]
fn game_needs_two_players_to_start() {
    let (mut session, store) = memory_session();
    let mut setup = game_setup(idle(session.state().unwrap()).start_game().unwrap());
    assert!(!setup.can_start_game());

    let ana = setup.add_player("Ana").unwrap();
    assert!(!setup.can_start_game());
    let mut setup = game_setup(setup.start_game().unwrap());

    setup.add_player("Bo").unwrap();
    assert!(setup.can_start_game());
    setup.rename_player(&ana, "Anna").unwrap();
    assert_eq!(setup.players().unwrap()[0].name, "Anna");

    let setup_round = round_setup(setup.start_game().unwrap());
    assert_eq!(setup_round.round().unwrap().number_of_cards(), 1);
    assert_eq!(store.save_count(), 2);
}

#[test]
fn roster_changes_in_setup() {
    let (mut session, _store) = memory_session();
    let mut setup = game_setup(idle(session.state().unwrap()).start_game().unwrap());
    let ana = setup.add_player("Ana").unwrap();
    setup.add_player("Bo").unwrap();

    assert_eq!(setup.remove_player(&ana).unwrap().map(|p| p.name), Some("Ana".into()));
    assert!(setup.remove_player(&ana).unwrap().is_none());
    assert!(!setup.can_start_game());

    let err = setup.rename_player(&ana, "Back").unwrap_err();
    assert_eq!(err.code(), ErrorCode::PlayerNotFound);
}

#[test]
fn forbidden_last_bet_is_rejected_without_changing_bets() {
    let (mut session, _store, ids) = session_with_players(&["Ana", "Bo"]);
    let mut setup = round_setup(session.state().unwrap());
    let order: Vec<PlayerId> = setup
        .players_order()
        .unwrap()
        .into_iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(order, ids);

    assert_eq!(setup.add_bet(&ids[0], 0).unwrap(), BetOutcome::Recorded);
    assert_eq!(setup.forbidden_last_bet().unwrap(), Some(1));
    let before = setup.round().unwrap().bets().clone();

    assert_eq!(setup.add_bet(&ids[1], 1).unwrap(), BetOutcome::Rejected);
    assert_eq!(setup.round().unwrap().bets(), &before);
    assert!(!setup.can_start_round());

    round_setup(setup.start_round().unwrap());
    assert_eq!(session.phase(), Phase::RoundSetup);
}

#[test]
fn changing_an_earlier_bet_clears_the_last_one() {
    let (mut session, _store, ids) = session_with_players(&["Ana", "Bo", "Cy"]);
    let mut setup = round_setup(session.state().unwrap());
    setup.add_bet(&ids[0], 0).unwrap();
    setup.add_bet(&ids[1], 0).unwrap();
    setup.add_bet(&ids[2], 0).unwrap();
    assert!(setup.can_start_round());

    setup.add_bet(&ids[1], 1).unwrap();
    assert_eq!(setup.round().unwrap().bet_for(&ids[2]), None);
    assert!(!setup.can_start_round());
}

#[test]
fn bets_for_strangers_are_not_found() {
    let (mut session, _store, _ids) = session_with_players(&["Ana", "Bo"]);
    let mut setup = round_setup(session.state().unwrap());
    let err = setup.add_bet(&PlayerId::from("ghost"), 0).unwrap_err();
    assert!(matches!(err, AppError::NotFound { code: ErrorCode::PlayerNotFound, .. }));
}

#[test]
fn submit_needs_every_result_and_a_failure() {
    let (mut session, _store, ids) = session_with_players(&["Ana", "Bo"]);
    let mut setup = round_setup(session.state().unwrap());
    setup.add_bet(&ids[0], 1).unwrap();
    setup.add_bet(&ids[1], 1).unwrap();
    let playing = round_in_progress(setup.start_round().unwrap());
    let mut ended = round_ended(playing.end_round().unwrap());

    ended.register_result(&ids[0], BetResult::Success).unwrap();
    assert!(!ended.can_submit_results());
    ended.register_result(&ids[1], BetResult::Success).unwrap();
    assert!(!ended.can_submit_results());

    let mut ended = round_ended(ended.submit_results().unwrap());
    assert!(!ended.round().unwrap().is_over());

    ended.register_result(&ids[1], BetResult::Failure).unwrap();
    assert_eq!(ended.result_for(&ids[1]).unwrap(), Some(BetResult::Failure));
    assert!(ended.can_submit_results());

    let display = results_display(ended.submit_results().unwrap());
    assert!(display.round().unwrap().is_over());
    let points = display.round_points().unwrap();
    assert_eq!(points[&ids[0]], 12);
    assert_eq!(points[&ids[1]], 0);
}

#[test]
fn full_game_climbs_returns_and_ends() {
    let (mut session, store, ids) = session_with_players(&["Ana", "Bo"]);

    // 1 card
    play_round_to_results(&mut session);
    let display = results_display(session.state().unwrap());
    assert!(display.can_start_return());
    assert!(!display.is_game_over());
    let setup = round_setup(display.next_round().unwrap());
    assert_eq!(setup.round().unwrap().number_of_cards(), 2);
    assert_eq!(setup.round().unwrap().first_player(), 1);

    // 2 cards, then turn around
    play_round_to_results(&mut session);
    let mut display = results_display(session.state().unwrap());
    assert!(display.can_start_return());
    assert!(!display.is_next_direction_backward());
    assert!(display.start_return().unwrap());
    assert!(display.is_next_direction_backward());
    assert!(!display.start_return().unwrap());
    assert!(!display.is_game_over());
    let setup = round_setup(display.next_round().unwrap());
    assert_eq!(setup.round().unwrap().number_of_cards(), 2);

    // 2 cards again on the way down
    play_round_to_results(&mut session);
    let display = results_display(session.state().unwrap());
    assert!(!display.can_start_return());
    assert!(!display.is_game_over());
    let setup = round_setup(display.next_round().unwrap());
    assert_eq!(setup.round().unwrap().number_of_cards(), 1);

    // final 1 card
    play_round_to_results(&mut session);
    let display = results_display(session.state().unwrap());
    assert!(display.is_game_over());
    let placings = display.placings().unwrap();
    assert_eq!(placings.len(), 2);
    assert!(placings.iter().all(|p| p.points == 20 && p.rank == 1));
    assert_eq!(placings[0].player_id, ids[0]);

    let display = results_display(display.next_round().unwrap());
    let state = display.end_game().unwrap();
    let idle_state = idle(state);
    assert_eq!(idle_state.finished_games().len(), 1);
    assert!(idle_state.finished_games()[0].is_over());
    assert_eq!(idle_state.finished_games()[0].rounds().len(), 4);

    assert!(session.game().is_none());
    assert_eq!(session.app().history().len(), 18);
    assert_eq!(store.save_count(), 18);
    assert_eq!(
        session.app().finished_games()[0].next_direction(),
        Direction::Backward
    );
}

#[test]
fn restore_picks_up_where_the_last_transition_left_off() {
    let (mut session, store, ids) = session_with_players(&["Ana", "Bo"]);
    play_round_to_results(&mut session);

    let mut restored = Session::restore(store.clone()).unwrap();
    assert_eq!(restored.app(), session.app());

    let display = results_display(restored.state().unwrap());
    assert_eq!(display.round_points().unwrap()[&ids[1]], 10);
}

#[test]
fn unsaved_mutations_are_written_by_persist() {
    let (mut session, store, ids) = session_with_players(&["Ana", "Bo"]);
    round_setup(session.state().unwrap())
        .add_bet(&ids[0], 1)
        .unwrap();
    let stale = Session::restore(store.clone()).unwrap();
    assert!(stale.game().unwrap().current_round().unwrap().bets().is_empty());

    session.persist().unwrap();
    let fresh = Session::restore(store).unwrap();
    assert_eq!(
        fresh.game().unwrap().current_round().unwrap().bet_for(&ids[0]),
        Some(1)
    );
}

#[test]
fn restore_from_an_empty_store_is_idle() {
    let session = Session::restore(MemoryStore::new()).unwrap();
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.app().history().is_empty());
}

#[test]
fn restore_rejects_an_unknown_state_tag() {
    let store = MemoryStore::with_blob(r#"{"currentState":"GameOverState"}"#);
    let err = Session::restore(store).unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
    assert_eq!(err.code(), ErrorCode::UnknownState);
}

#[test]
fn huge_bets_are_scored_as_an_error_not_a_panic() {
    let (mut session, _store, ids) = session_with_players(&["Ana", "Bo", "Cy"]);
    let mut setup = round_setup(session.state().unwrap());
    assert_eq!(setup.add_bet(&ids[0], u32::MAX).unwrap(), BetOutcome::Recorded);
    assert_eq!(setup.add_bet(&ids[1], 1).unwrap(), BetOutcome::Recorded);
    assert_eq!(setup.forbidden_last_bet().unwrap(), None);
    assert_eq!(setup.add_bet(&ids[2], 0).unwrap(), BetOutcome::Recorded);

    let playing = round_in_progress(setup.start_round().unwrap());
    let mut ended = round_ended(playing.end_round().unwrap());
    ended.register_result(&ids[0], BetResult::Success).unwrap();
    ended.register_result(&ids[1], BetResult::Failure).unwrap();
    ended.register_result(&ids[2], BetResult::Success).unwrap();

    let display = results_display(ended.submit_results().unwrap());
    assert_eq!(display.round_points().unwrap_err().code(), ErrorCode::ScoreOverflow);
    assert_eq!(display.placings().unwrap_err().code(), ErrorCode::ScoreOverflow);
}
