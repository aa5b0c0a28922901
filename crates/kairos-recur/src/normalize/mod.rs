//! Canonicalization of validated submissions into storage-ready patterns.

pub mod sanitize;

use std::collections::BTreeSet;

use kairos_core::constants::{DEFAULT_DURATION_SECONDS, DEFAULT_INTERVAL};
use kairos_core::types::{Frequency, WeekdayCode};

use crate::model::{ListField, RecurrencePattern, RecurrenceSubmission};
use crate::validation::{ValidSubmission, ValidationError, validated};
use sanitize::sanitize_text;

/// ## Summary
/// Maps a validated submission to its canonical pattern.
///
/// Weekday names become codes, dates are sanitized as free text, `interval`
/// defaults to 1 and the duration to 3600 seconds. Fields that do not apply
/// to the frequency are left out.
///
/// ## Side Effects
/// None. Persisting the pattern is the caller's job.
#[must_use]
pub fn normalize(valid: &ValidSubmission<'_>) -> RecurrencePattern {
    let submission = valid.submission();
    let frequency = valid.frequency();

    let mut pattern = RecurrencePattern {
        frequency,
        interval: submission
            .interval
            .and_then(|n| u16::try_from(n).ok())
            .unwrap_or(DEFAULT_INTERVAL),
        start_date: None,
        end_date: None,
        days_of_week: BTreeSet::new(),
        day_of_week: None,
        week_of_month: None,
        specific_dates: Vec::new(),
        exclude_dates: sanitized_entries(submission.exclude_dates.as_ref()),
        duration_seconds: submission
            .duration
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_DURATION_SECONDS),
    };

    if frequency.is_date_bounded() {
        pattern.start_date = submission.start_date.as_deref().map(sanitize_text);
        pattern.end_date = submission.end_date.as_deref().map(sanitize_text);
    }

    match frequency {
        Frequency::Weekly => {
            pattern.days_of_week = weekday_codes(submission);
        }
        Frequency::Monthly => {
            pattern.day_of_week = submission
                .day_of_week
                .as_deref()
                .and_then(WeekdayCode::from_name);
            pattern.week_of_month = submission.week_of_month.and_then(|n| i8::try_from(n).ok());
        }
        Frequency::Specific => {
            pattern.specific_dates = sanitized_entries(submission.dates.as_ref());
        }
    }

    tracing::debug!(
        %frequency,
        interval = pattern.interval,
        duration_seconds = pattern.duration_seconds,
        excluded = pattern.exclude_dates.len(),
        "Normalized recurrence pattern"
    );
    pattern
}

/// ## Summary
/// Validates then normalizes a submission.
///
/// ## Errors
/// Returns the first `ValidationError` raised by the validator.
pub fn parse(submission: &RecurrenceSubmission) -> Result<RecurrencePattern, ValidationError> {
    Ok(normalize(&validated(submission)?))
}

/// Unknown names cannot survive validation, they are skipped if one does.
fn weekday_codes(submission: &RecurrenceSubmission) -> BTreeSet<WeekdayCode> {
    submission
        .days_of_week
        .as_ref()
        .map(ListField::entries)
        .unwrap_or_default()
        .into_iter()
        .filter_map(WeekdayCode::from_name)
        .collect()
}

fn sanitized_entries(field: Option<&ListField>) -> Vec<String> {
    field
        .map(ListField::entries)
        .unwrap_or_default()
        .into_iter()
        .map(sanitize_text)
        .filter(|entry| !entry.is_empty())
        .collect()
}
