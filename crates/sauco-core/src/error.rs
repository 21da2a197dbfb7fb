use thiserror::Error;

/// Failures surfaced by persistence backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("the dataset file is open in another program; close it and try again")]
    Locked,
    #[error("could not read the dataset: {0}")]
    Corrupt(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// Input rejections raised before any mutation takes place.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("the catalog upload must contain a `{0}` column")]
    MissingColumn(&'static str),
    #[error("quantity must be greater than zero (got {0})")]
    NonPositiveQuantity(f64),
    #[error("transfers need two different sectors")]
    SameSectorTransfer,
}

/// Unified error type for the service and storage layers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
