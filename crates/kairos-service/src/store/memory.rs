use std::collections::HashMap;
use std::sync::RwLock;

use kairos_core::types::PatternId;
use kairos_recur::RecurrencePattern;

use super::{PatternStore, StoreError, StoreResult, StoredPattern};

/// ## Summary
/// In-process pattern store.
///
/// Rows hold the canonical JSON encoding, the same text a persistent
/// backend would write, so decoding is exercised on every fetch.
#[derive(Debug, Default)]
pub struct MemoryPatternStore {
    rows: RwLock<HashMap<PatternId, String>>,
}

impl MemoryPatternStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Number of stored patterns.
    ///
    /// ## Errors
    /// Returns an error if the lock is poisoned.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.rows.read().map_err(poisoned)?.len())
    }

    /// ## Errors
    /// Returns an error if the lock is poisoned.
    pub fn is_empty(&self) -> StoreResult<bool> {
        self.len().map(|len| len == 0)
    }
}

impl PatternStore for MemoryPatternStore {
    #[tracing::instrument(skip(self, pattern), fields(frequency = %pattern.frequency))]
    fn create(&self, pattern: &RecurrencePattern) -> StoreResult<PatternId> {
        let encoded = pattern.to_json()?;
        let id = PatternId::generate();
        self.rows.write().map_err(poisoned)?.insert(id, encoded);

        tracing::debug!(%id, "Stored recurrence pattern");
        Ok(id)
    }

    fn fetch_by_id(&self, id: PatternId) -> StoreResult<Option<StoredPattern>> {
        let rows = self.rows.read().map_err(poisoned)?;
        let Some(encoded) = rows.get(&id) else {
            tracing::trace!(%id, "Recurrence pattern not found");
            return Ok(None);
        };

        let pattern = RecurrencePattern::from_json(encoded)?;
        Ok(Some(StoredPattern { id, pattern }))
    }

    fn delete(&self, id: PatternId) -> StoreResult<bool> {
        let removed = self.rows.write().map_err(poisoned)?.remove(&id).is_some();
        tracing::debug!(%id, removed, "Deleted recurrence pattern");
        Ok(removed)
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> StoreError {
    StoreError::Poisoned(err.to_string())
}
