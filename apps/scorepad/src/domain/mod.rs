//! Domain layer: the game entities, their rules and scoring.

pub mod game;
pub mod player;
pub mod round;
pub mod rules;
pub mod scoring;

#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use game::{Direction, Game};
pub use player::{Player, PlayerId};
pub use round::{BetOutcome, BetResult, Round};
pub use scoring::Placing;
