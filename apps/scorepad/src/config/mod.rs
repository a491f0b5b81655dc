pub mod storage;

use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub use storage::StorageConfig;

/// Log output format, from `SCOREPAD_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, one event per line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("SCOREPAD_LOG_FORMAT") {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!(
                "SCOREPAD_LOG_FORMAT must be 'json' or 'pretty', got '{other}'"
            ))),
        }
    }
}
