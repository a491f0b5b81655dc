//! Error codes surfaced by the scorepad library and CLI.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes
//! are SCREAMING_SNAKE_CASE and map 1:1 to the strings printed by the CLI.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Resource Not Found
    /// No game in progress
    GameNotFound,
    /// No round in progress
    RoundNotFound,
    /// Player id not on the roster
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Session
    /// Persisted state tag has no matching phase
    UnknownState,
    /// Command is not available in the current phase
    PhaseMismatch,

    // Rule Validation
    /// Points requested for an open round
    RoundNotOver,
    /// Successful result without a bet
    MissingBet,
    /// Score or total exceeds the representable range
    ScoreOverflow,
    /// General validation error
    ValidationError,
    /// Malformed command input
    BadRequest,

    // System Errors
    /// Snapshot could not be encoded or decoded
    CodecError,
    /// Snapshot storage failed
    StorageError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string representation of this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::UnknownState => "UNKNOWN_STATE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::RoundNotOver => "ROUND_NOT_OVER",
            Self::MissingBet => "MISSING_BET",
            Self::ScoreOverflow => "SCORE_OVERFLOW",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::CodecError => "CODEC_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
