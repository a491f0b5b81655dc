//! Converts the session entities to and from their persisted snapshot.
//!
//! Decoding fails closed: an unrecognized phase tag is an
//! `InvalidTransition`, and a phase whose game or round is missing is a
//! `NotFound`. No phase tag at all restores an idle session.

pub mod dto;

use crate::domain::{BetResult, Direction, Game, Player, PlayerId, Round};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::session::{App, Phase};

pub use dto::{
    AppSnapshot, BetResultSnapshot, DirectionSnapshot, GameSnapshot, PlayerSnapshot,
    RoundSnapshot,
};

pub fn encode(app: &App) -> AppSnapshot {
    AppSnapshot {
        current_game: app.current_game().map(encode_game),
        current_state: Some(app.current_state().as_str().to_string()),
        history: app
            .history()
            .iter()
            .map(|phase| phase.as_str().to_string())
            .collect(),
        finished_games: app.finished_games().iter().map(encode_game).collect(),
    }
}

pub fn decode(snapshot: AppSnapshot) -> Result<App, DomainError> {
    let current_state = match snapshot.current_state.as_deref() {
        Some(tag) => tag.parse::<Phase>()?,
        None => Phase::Idle,
    };
    let history = snapshot
        .history
        .iter()
        .map(|tag| tag.parse::<Phase>())
        .collect::<Result<Vec<_>, _>>()?;

    let app = App {
        current_game: snapshot.current_game.map(decode_game),
        current_state,
        history,
        finished_games: snapshot.finished_games.into_iter().map(decode_game).collect(),
    };
    app.check_invariants()?;
    Ok(app)
}

pub fn to_json(app: &App) -> Result<String, AppError> {
    Ok(serde_json::to_string(&encode(app))?)
}

pub fn from_json(blob: &str) -> Result<App, AppError> {
    let snapshot: AppSnapshot = serde_json::from_str(blob)?;
    Ok(decode(snapshot)?)
}

fn encode_game(game: &Game) -> GameSnapshot {
    GameSnapshot {
        id: game.id().to_string(),
        players: game
            .players()
            .iter()
            .map(|p| PlayerSnapshot {
                id: p.id.to_string(),
                name: p.name.clone(),
            })
            .collect(),
        rounds: game.rounds().iter().map(encode_round).collect(),
        current_round: game.current_round().map(encode_round),
        next_direction: match game.next_direction() {
            Direction::Forward => DirectionSnapshot::Forward,
            Direction::Backward => DirectionSnapshot::Backward,
        },
        next_player_index: game.next_player_index(),
        next_number_of_cards: game.next_number_of_cards(),
        is_over: game.is_over(),
    }
}

fn decode_game(snapshot: GameSnapshot) -> Game {
    Game::from_parts(
        snapshot.id,
        snapshot
            .players
            .into_iter()
            .map(|p| Player {
                id: PlayerId::from(p.id),
                name: p.name,
            })
            .collect(),
        snapshot.rounds.into_iter().map(decode_round).collect(),
        snapshot.current_round.map(decode_round),
        match snapshot.next_direction {
            DirectionSnapshot::Forward => Direction::Forward,
            DirectionSnapshot::Backward => Direction::Backward,
        },
        snapshot.next_player_index,
        snapshot.next_number_of_cards,
        snapshot.is_over,
    )
}

fn encode_round(round: &Round) -> RoundSnapshot {
    RoundSnapshot {
        bets: round
            .bets()
            .iter()
            .map(|(id, bet)| (id.to_string(), *bet))
            .collect(),
        results: round
            .results()
            .iter()
            .map(|(id, result)| {
                let result = match result {
                    BetResult::Success => BetResultSnapshot::Success,
                    BetResult::Failure => BetResultSnapshot::Failure,
                };
                (id.to_string(), result)
            })
            .collect(),
        is_over: round.is_over(),
        number_of_cards: round.number_of_cards(),
        first_player: round.first_player(),
    }
}

fn decode_round(snapshot: RoundSnapshot) -> Round {
    Round::from_parts(
        snapshot.number_of_cards,
        snapshot.first_player,
        snapshot
            .bets
            .into_iter()
            .map(|(id, bet)| (PlayerId::from(id), bet))
            .collect(),
        snapshot
            .results
            .into_iter()
            .map(|(id, result)| {
                let result = match result {
                    BetResultSnapshot::Success => BetResult::Success,
                    BetResultSnapshot::Failure => BetResult::Failure,
                };
                (PlayerId::from(id), result)
            })
            .collect(),
        snapshot.is_over,
    )
}
