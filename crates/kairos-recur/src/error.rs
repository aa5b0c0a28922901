use thiserror::Error;

use crate::validation::ValidationError;

/// Recurrence parsing and encoding errors
#[derive(Error, Debug)]
pub enum RecurError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Pattern encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;
