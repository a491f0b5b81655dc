use std::fmt;
use std::str::FromStr;

use crate::domain::{Game, Round};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Session phases, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No game in progress.
    #[default]
    Idle,
    /// Collecting players.
    GameSetup,
    /// Collecting bets for the current hand.
    RoundSetup,
    /// Bets locked, hand being played.
    RoundInProgress,
    /// Recording who made their bet.
    RoundEnded,
    /// Scores shown; choose whether to start the return.
    ResultsDisplay,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Idle,
        Phase::GameSetup,
        Phase::RoundSetup,
        Phase::RoundInProgress,
        Phase::RoundEnded,
        Phase::ResultsDisplay,
    ];

    /// Persisted tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::GameSetup => "game-setup",
            Phase::RoundSetup => "round-setup",
            Phase::RoundInProgress => "round-in-progress",
            Phase::RoundEnded => "round-ended",
            Phase::ResultsDisplay => "results-display",
        }
    }

    /// Every phase except `Idle` operates on a current game.
    pub const fn needs_game(self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Phases that operate on a current round.
    pub const fn needs_round(self) -> bool {
        matches!(
            self,
            Phase::RoundSetup | Phase::RoundInProgress | Phase::RoundEnded | Phase::ResultsDisplay
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = DomainError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "idle" => Ok(Phase::Idle),
            "game-setup" => Ok(Phase::GameSetup),
            "round-setup" => Ok(Phase::RoundSetup),
            "round-in-progress" => Ok(Phase::RoundInProgress),
            "round-ended" => Ok(Phase::RoundEnded),
            "results-display" => Ok(Phase::ResultsDisplay),
            other => Err(DomainError::unknown_state(other)),
        }
    }
}

/// Session root: the game in progress, the current phase and what came before.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct App {
    pub(crate) current_game: Option<Game>,
    pub(crate) current_state: Phase,
    pub(crate) history: Vec<Phase>,
    pub(crate) finished_games: Vec<Game>,
}

impl App {
    pub fn current_game(&self) -> Option<&Game> {
        self.current_game.as_ref()
    }

    pub fn current_state(&self) -> Phase {
        self.current_state
    }

    /// Phases left behind, oldest first.
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    /// Games closed with `end_game`, oldest first.
    pub fn finished_games(&self) -> &[Game] {
        &self.finished_games
    }

    pub fn require_game(&self, ctx: &'static str) -> Result<&Game, DomainError> {
        self.current_game.as_ref().ok_or_else(|| no_game(ctx))
    }

    pub fn require_game_mut(&mut self, ctx: &'static str) -> Result<&mut Game, DomainError> {
        self.current_game.as_mut().ok_or_else(|| no_game(ctx))
    }

    pub fn require_round(&self, ctx: &'static str) -> Result<&Round, DomainError> {
        self.require_game(ctx)?.current_round().ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("no round in progress ({ctx})"))
        })
    }

    /// The current phase has the game and round it operates on.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        let phase = self.current_state;
        if phase.needs_round() {
            self.require_round(phase.as_str())?;
        } else if phase.needs_game() {
            self.require_game(phase.as_str())?;
        }
        Ok(())
    }
}

fn no_game(ctx: &'static str) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("no game in progress ({ctx})"))
}
