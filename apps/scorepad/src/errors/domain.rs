//! Domain-level error type used by the entities, the codec and the session.
//!
//! This error type knows nothing about files or terminals. Callers at the
//! library boundary convert it into `crate::error::AppError` through the
//! provided `From<DomainError> for AppError` implementation.
//!
//! Rejected input (a forbidden last bet, submitting results too early) is not
//! represented here: those operations leave state untouched and report via
//! their guard predicates.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Entities a session operation can find missing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Round,
    Player,
    Other(String),
}

/// Rule violations raised by scoring preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Points were requested for a round that is still open.
    RoundNotOver,
    /// A successful result has no bet to score against.
    MissingBet,
    /// A score or total does not fit in a `u32`.
    ScoreOverflow,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing game, round or player; the caller used the wrong phase or id
    NotFound(NotFoundKind, String),
    /// Persisted phase tag with no matching variant
    InvalidTransition(String),
    /// Business rule precondition failed
    Validation(ValidationKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::InvalidTransition(d) => write!(f, "invalid transition: {d}"),
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn invalid_transition(detail: impl Into<String>) -> Self {
        Self::InvalidTransition(detail.into())
    }
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    /// Unknown phase tag, as found in a snapshot.
    pub fn unknown_state(tag: &str) -> Self {
        Self::InvalidTransition(format!("unknown state tag '{tag}'"))
    }
}
