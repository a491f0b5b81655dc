//! Per-phase capability handles.
//!
//! Each handle borrows the [`Session`] mutably and exposes only the operations
//! legal in its phase. Transitions consume the handle and hand back the
//! [`State`] the session ended up in. A transition whose guard does not hold
//! is rejected input: it logs a warning and returns the same phase, unchanged.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::domain::rules::MIN_PLAYERS;
use crate::domain::{BetOutcome, BetResult, Direction, Game, Placing, Player, PlayerId, Round};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::session::{Phase, Session};

/// The session's current phase, carrying the handle for it.
#[derive(Debug)]
pub enum State<'a> {
    Idle(Idle<'a>),
    GameSetup(GameSetup<'a>),
    RoundSetup(RoundSetup<'a>),
    RoundInProgress(RoundInProgress<'a>),
    RoundEnded(RoundEnded<'a>),
    ResultsDisplay(ResultsDisplay<'a>),
}

impl<'a> State<'a> {
    /// Handle matching the session's current phase.
    pub(crate) fn resolve(session: &'a mut Session) -> Result<Self, AppError> {
        session.app.check_invariants()?;
        Ok(match session.app.current_state {
            Phase::Idle => State::Idle(Idle { session }),
            Phase::GameSetup => State::GameSetup(GameSetup { session }),
            Phase::RoundSetup => State::RoundSetup(RoundSetup { session }),
            Phase::RoundInProgress => State::RoundInProgress(RoundInProgress { session }),
            Phase::RoundEnded => State::RoundEnded(RoundEnded { session }),
            Phase::ResultsDisplay => State::ResultsDisplay(ResultsDisplay { session }),
        })
    }

    pub fn phase(&self) -> Phase {
        match self {
            State::Idle(_) => Phase::Idle,
            State::GameSetup(_) => Phase::GameSetup,
            State::RoundSetup(_) => Phase::RoundSetup,
            State::RoundInProgress(_) => Phase::RoundInProgress,
            State::RoundEnded(_) => Phase::RoundEnded,
            State::ResultsDisplay(_) => Phase::ResultsDisplay,
        }
    }
}

fn enter(session: &mut Session, target: Phase) -> Result<State<'_>, AppError> {
    session.next_state(target)?;
    State::resolve(session)
}

/// Read access shared by every handle that operates on a game.
pub trait GameScoped {
    fn session(&self) -> &Session;

    fn game(&self) -> Result<&Game, AppError> {
        Ok(self.session().app.require_game("game")?)
    }

    fn players(&self) -> Result<&[Player], AppError> {
        Ok(self.game()?.players())
    }
}

/// Read access for handles whose phase has a current round.
pub trait RoundScoped: GameScoped {
    fn round(&self) -> Result<&Round, AppError> {
        Ok(self.session().app.require_round("round")?)
    }

    /// Roster in this round's turn order.
    fn players_order(&self) -> Result<Vec<&Player>, AppError> {
        let game = self.game()?;
        Ok(game.require_round()?.players_order(game.players()))
    }
}

macro_rules! scoped_handle {
    ($handle:ident) => {
        impl GameScoped for $handle<'_> {
            fn session(&self) -> &Session {
                self.session
            }
        }
    };
    ($handle:ident, round) => {
        scoped_handle!($handle);
        impl RoundScoped for $handle<'_> {}
    };
}

scoped_handle!(GameSetup);
scoped_handle!(RoundSetup, round);
scoped_handle!(RoundInProgress, round);
scoped_handle!(RoundEnded, round);
scoped_handle!(ResultsDisplay, round);

#[derive(Debug)]
pub struct Idle<'a> {
    session: &'a mut Session,
}

impl<'a> Idle<'a> {
    /// Games closed earlier in this session, oldest first.
    pub fn finished_games(&self) -> &[Game] {
        self.session.app.finished_games()
    }

    /// Open a new, empty game and move to player setup.
    pub fn start_game(self) -> Result<State<'a>, AppError> {
        let game = Game::new();
        info!(game_id = %game.id(), "Game created");
        self.session.app.current_game = Some(game);
        enter(self.session, Phase::GameSetup)
    }
}

#[derive(Debug)]
pub struct GameSetup<'a> {
    session: &'a mut Session,
}

impl<'a> GameSetup<'a> {
    fn game_mut(&mut self) -> Result<&mut Game, AppError> {
        Ok(self.session.app.require_game_mut("game setup")?)
    }

    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, AppError> {
        Ok(self.game_mut()?.add_player(name))
    }

    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Option<Player>, AppError> {
        Ok(self.game_mut()?.remove_player(id))
    }

    pub fn rename_player(&mut self, id: &PlayerId, name: &str) -> Result<(), AppError> {
        Ok(self.game_mut()?.rename_player(id, name)?)
    }

    pub fn can_start_game(&self) -> bool {
        self.players().is_ok_and(|p| p.len() >= MIN_PLAYERS)
    }

    /// Deal the first round and move to betting.
    pub fn start_game(mut self) -> Result<State<'a>, AppError> {
        if !self.can_start_game() {
            warn!(
                players = self.players().map_or(0, <[Player]>::len),
                min = MIN_PLAYERS,
                "Start rejected: not enough players"
            );
            return Ok(State::GameSetup(self));
        }
        let game = self.game_mut()?;
        game.start_round();
        info!(game_id = %game.id(), players = game.players().len(), "Game started");
        enter(self.session, Phase::RoundSetup)
    }
}

#[derive(Debug)]
pub struct RoundSetup<'a> {
    session: &'a mut Session,
}

impl<'a> RoundSetup<'a> {
    /// Record a bet. The last player's forbidden value comes back `Rejected`
    /// and leaves the round as it was.
    pub fn add_bet(&mut self, player: &PlayerId, bet: u32) -> Result<BetOutcome, AppError> {
        let game = self.session.app.require_game_mut("round setup")?;
        Ok(game.place_bet(player, bet)?)
    }

    /// The value the last player may not bet right now, if any.
    pub fn forbidden_last_bet(&self) -> Result<Option<u32>, AppError> {
        let game = self.game()?;
        Ok(game.require_round()?.forbidden_last_bet(game.players()))
    }

    pub fn can_start_round(&self) -> bool {
        self.game()
            .is_ok_and(|g| g.current_round().is_some_and(|r| r.has_all_bets(g.players())))
    }

    /// Lock the bets and start play.
    pub fn start_round(self) -> Result<State<'a>, AppError> {
        if !self.can_start_round() {
            warn!("Round start rejected: bets missing");
            return Ok(State::RoundSetup(self));
        }
        enter(self.session, Phase::RoundInProgress)
    }
}

#[derive(Debug)]
pub struct RoundInProgress<'a> {
    session: &'a mut Session,
}

impl<'a> RoundInProgress<'a> {
    /// Play is over; move to recording results.
    pub fn end_round(self) -> Result<State<'a>, AppError> {
        enter(self.session, Phase::RoundEnded)
    }
}

#[derive(Debug)]
pub struct RoundEnded<'a> {
    session: &'a mut Session,
}

impl<'a> RoundEnded<'a> {
    pub fn result_for(&self, player: &PlayerId) -> Result<Option<BetResult>, AppError> {
        Ok(self.round()?.result_for(player))
    }

    pub fn register_result(&mut self, player: &PlayerId, result: BetResult) -> Result<(), AppError> {
        let game = self.session.app.require_game_mut("round ended")?;
        Ok(game.record_result(player, result)?)
    }

    pub fn can_submit_results(&self) -> bool {
        self.game()
            .is_ok_and(|g| g.current_round().is_some_and(|r| r.can_be_closed(g.players())))
    }

    /// Close the round and show the scores.
    pub fn submit_results(self) -> Result<State<'a>, AppError> {
        if !self.can_submit_results() {
            warn!("Submit rejected: results missing or nobody failed");
            return Ok(State::RoundEnded(self));
        }
        self.session.app.require_game_mut("submit results")?.end_round();
        enter(self.session, Phase::ResultsDisplay)
    }
}

#[derive(Debug)]
pub struct ResultsDisplay<'a> {
    session: &'a mut Session,
}

impl<'a> ResultsDisplay<'a> {
    /// Points for the round on display.
    pub fn round_points(&self) -> Result<BTreeMap<PlayerId, u32>, AppError> {
        Ok(self.round()?.points()?)
    }

    pub fn placings(&self) -> Result<Vec<Placing>, AppError> {
        Ok(self.game()?.placings()?)
    }

    pub fn can_start_return(&self) -> bool {
        self.game().is_ok_and(Game::can_start_return)
    }

    pub fn is_next_direction_backward(&self) -> bool {
        self.game()
            .is_ok_and(|g| g.next_direction() == Direction::Backward)
    }

    /// Turn the hand sizes around. `false` if that is not allowed now.
    pub fn start_return(&mut self) -> Result<bool, AppError> {
        let game = self.session.app.require_game_mut("start return")?;
        let flipped = game.start_return();
        if !flipped {
            warn!(game_id = %game.id(), "Return rejected: hand sizes not climbing");
        }
        Ok(flipped)
    }

    pub fn is_game_over(&self) -> bool {
        self.game().is_ok_and(Game::is_game_over)
    }

    /// Deal the next round. Rejected once the game is over.
    pub fn next_round(self) -> Result<State<'a>, AppError> {
        if self.is_game_over() {
            warn!("Next round rejected: game is over");
            return Ok(State::ResultsDisplay(self));
        }
        self.session.app.require_game_mut("next round")?.start_round();
        enter(self.session, Phase::RoundSetup)
    }

    /// Close the game, archive it and go back to idle.
    pub fn end_game(self) -> Result<State<'a>, AppError> {
        let app = &mut self.session.app;
        let mut game = app.current_game.take().ok_or_else(|| {
            AppError::not_found(ErrorCode::GameNotFound, "no game to end")
        })?;
        game.finish();
        info!(game_id = %game.id(), rounds = game.rounds().len(), "Game ended");
        app.finished_games.push(game);
        enter(self.session, Phase::Idle)
    }
}
