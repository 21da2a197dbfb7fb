use sauco_core::{CoreError, StoreError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

/// User-facing error wrapper for CLI operations.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("{0}")]
    Usage(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Core(CoreError::from(err))
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(CoreError::from(err))
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Input(err.to_string())
    }
}
