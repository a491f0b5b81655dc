use std::env;
use std::path::PathBuf;

use crate::error::AppError;

const DEFAULT_DATA_FILE: &str = "scorepad.json";

/// Where the session snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

impl StorageConfig {
    /// Reads `SCOREPAD_DATA_FILE` (defaults to `scorepad.json`).
    pub fn from_env() -> Result<Self, AppError> {
        let data_file = match env::var("SCOREPAD_DATA_FILE") {
            Ok(value) if value.trim().is_empty() => {
                return Err(AppError::config("SCOREPAD_DATA_FILE is set but empty"));
            }
            Ok(value) => PathBuf::from(value),
            Err(_) => PathBuf::from(DEFAULT_DATA_FILE),
        };
        Ok(Self { data_file })
    }

    /// `path` if given, otherwise the environment.
    pub fn resolve(path: Option<PathBuf>) -> Result<Self, AppError> {
        match path {
            Some(data_file) => Ok(Self { data_file }),
            None => Self::from_env(),
        }
    }
}
