use thiserror::Error;

use crate::store::StoreError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] kairos_recur::ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// ## Summary
    /// Machine-readable code for callers that report errors over the wire.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.code(),
            Self::Store(_) => "internal_error",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
