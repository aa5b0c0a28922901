//! Recurrence operations: create, fetch, delete and instance listing.

mod query;

use chrono::NaiveDate;
use kairos_core::config::ExpansionConfig;
use kairos_core::types::PatternId;
use kairos_recur::{
    Expander, ExpansionOptions, Instance, RecurrenceSubmission, RecurrenceView, normalize,
    validated,
};
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::store::PatternStore;

pub use query::InstanceQuery;

/// Body returned by [`RecurrenceService::recurrence_instances`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstancesResponse {
    pub recurrence_id: PatternId,
    pub pattern: RecurrenceView,
    pub instances: Vec<Instance>,
    pub count: usize,
}

/// ## Summary
/// Validates, stores and expands recurrence patterns on top of a [`PatternStore`].
#[derive(Debug)]
pub struct RecurrenceService<S> {
    store: S,
    expander: Expander,
    expansion: ExpansionConfig,
}

impl<S: PatternStore> RecurrenceService<S> {
    #[must_use]
    pub fn new(store: S, expansion: ExpansionConfig) -> Self {
        Self {
            store,
            expander: Expander::new(ExpansionOptions::from(&expansion)),
            expansion,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// ## Summary
    /// Validates and normalizes a submission, then stores the canonical form.
    ///
    /// ## Errors
    /// Returns `ServiceError::Validation` for rejected input and
    /// `ServiceError::Store` if persisting fails.
    ///
    /// ## Side Effects
    /// Inserts one pattern into the store.
    #[tracing::instrument(skip_all)]
    pub fn create_recurrence(
        &self,
        submission: &RecurrenceSubmission,
    ) -> ServiceResult<RecurrenceView> {
        let valid = validated(submission).inspect_err(|err| {
            tracing::debug!(code = err.code(), error = %err, "Rejected recurrence submission");
        })?;
        let pattern = normalize(&valid);
        let id = self.store.create(&pattern)?;

        tracing::info!(%id, frequency = %pattern.frequency, "Created recurrence pattern");
        Ok(pattern.view(id))
    }

    /// ## Summary
    /// Returns the public view of a stored pattern.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if no pattern has this id.
    pub fn get_recurrence(&self, id: PatternId) -> ServiceResult<RecurrenceView> {
        let stored = self
            .store
            .fetch_by_id(id)?
            .ok_or_else(|| not_found(id))?;
        Ok(stored.pattern.view(stored.id))
    }

    /// ## Summary
    /// Deletes a stored pattern.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if no pattern has this id.
    ///
    /// ## Side Effects
    /// Removes the pattern from the store.
    pub fn delete_recurrence(&self, id: PatternId) -> ServiceResult<()> {
        if !self.store.delete(id)? {
            return Err(not_found(id));
        }
        tracing::info!(%id, "Deleted recurrence pattern");
        Ok(())
    }

    /// ## Summary
    /// Expands a stored pattern over the window described by `query`.
    ///
    /// Missing bounds resolve against `today`, see [`InstanceQuery::resolve`].
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` for an unknown id and
    /// `ServiceError::InvalidInput` for unparseable window bounds.
    #[tracing::instrument(skip(self, query), fields(recurrence_id = %id))]
    pub fn recurrence_instances(
        &self,
        id: PatternId,
        query: &InstanceQuery,
        today: NaiveDate,
    ) -> ServiceResult<InstancesResponse> {
        let stored = self
            .store
            .fetch_by_id(id)?
            .ok_or_else(|| not_found(id))?;
        let window = query.resolve(today, &self.expansion)?;

        let instances = self.expander.expand(&stored.pattern, window);
        tracing::debug!(
            window_start = %window.start,
            window_end = %window.end,
            count = instances.len(),
            "Listed recurrence instances"
        );

        Ok(InstancesResponse {
            recurrence_id: stored.id,
            pattern: stored.pattern.view(stored.id),
            count: instances.len(),
            instances,
        })
    }
}

fn not_found(id: PatternId) -> ServiceError {
    ServiceError::NotFound(format!("recurrence pattern {id}"))
}
