use thiserror::Error;

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;

/// Error type for everything that crosses the library boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Invalid transition: {detail}")]
    InvalidTransition { detail: String },
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Codec error: {detail}")]
    Codec { detail: String },
    #[error("Storage error: {detail}")]
    Storage { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Error code for this variant.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound { code, .. } => *code,
            AppError::InvalidTransition { .. } => ErrorCode::UnknownState,
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Codec { .. } => ErrorCode::CodecError,
            AppError::Storage { .. } => ErrorCode::StorageError,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    /// A command was issued in a phase that does not offer it.
    pub fn phase_mismatch(command: &str, phase: impl std::fmt::Display) -> Self {
        Self::bad_request(
            ErrorCode::PhaseMismatch,
            format!("`{command}` is not available in phase '{phase}'"),
        )
    }

    pub fn codec(detail: impl Into<String>) -> Self {
        Self::Codec {
            detail: detail.into(),
        }
    }

    pub fn storage(detail: impl Into<String>) -> Self {
        Self::Storage {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::Round => ErrorCode::RoundNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::InvalidTransition(detail) => AppError::InvalidTransition { detail },
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::RoundNotOver => ErrorCode::RoundNotOver,
                    ValidationKind::MissingBet => ErrorCode::MissingBet,
                    ValidationKind::ScoreOverflow => ErrorCode::ScoreOverflow,
                    _ => ErrorCode::ValidationError,
                };
                AppError::Validation { code, detail }
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::codec(format!("json error: {e}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::storage(format!("io error: {e}"))
    }
}
