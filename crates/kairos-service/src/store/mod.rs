//! Persistence seam for canonical recurrence patterns.

mod memory;

use kairos_core::types::PatternId;
use kairos_recur::RecurrencePattern;
use thiserror::Error;

pub use memory::MemoryPatternStore;

/// Pattern store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store lock poisoned: {0}")]
    Poisoned(String),

    #[error("Stored pattern could not be encoded or decoded: {0}")]
    Encoding(#[from] kairos_recur::error::RecurError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A canonical pattern together with the identifier it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPattern {
    pub id: PatternId,
    pub pattern: RecurrencePattern,
}

/// ## Summary
/// Storage for canonical patterns, keyed by [`PatternId`].
///
/// Patterns are immutable once stored; there is no update operation.
pub trait PatternStore {
    /// ## Summary
    /// Stores `pattern` under a freshly generated identifier.
    ///
    /// ## Errors
    /// Returns an error if the backing storage fails.
    fn create(&self, pattern: &RecurrencePattern) -> StoreResult<PatternId>;

    /// ## Summary
    /// Fetches a pattern by id, `None` when absent.
    ///
    /// ## Errors
    /// Returns an error if the backing storage fails or holds an undecodable row.
    fn fetch_by_id(&self, id: PatternId) -> StoreResult<Option<StoredPattern>>;

    /// ## Summary
    /// Removes a pattern. Returns whether anything was removed.
    ///
    /// ## Errors
    /// Returns an error if the backing storage fails.
    fn delete(&self, id: PatternId) -> StoreResult<bool>;
}
