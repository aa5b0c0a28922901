//! Validation of submitted recurrence patterns.
//!
//! Rules run in a fixed order and the first failure is returned, so every
//! submission maps to exactly one outcome. Nothing here performs I/O.

use kairos_core::constants::{LAST_WEEK_OF_MONTH, MAX_WEEK_OF_MONTH, MIN_WEEK_OF_MONTH};
use kairos_core::types::{Frequency, WeekdayCode};
use thiserror::Error;

use crate::model::{ListField, RecurrenceSubmission};


/// Caller-input errors raised while validating a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Frequency must be one of: weekly, monthly, specific")]
    InvalidFrequency,

    #[error("Start date is required")]
    MissingStartDate,

    #[error("End date is required")]
    MissingEndDate,

    #[error("Interval must be a whole number between 1 and 65535")]
    InvalidInterval,

    #[error("Days of week are required for weekly recurrence")]
    MissingDaysOfWeek,

    #[error("Day of week and week of month are required")]
    MissingMonthlyPattern,

    #[error("Specific dates are required")]
    MissingDates,

    #[error("Unknown day of week: {0:?}")]
    UnknownWeekday(String),

    #[error("Week of month must be 1-5 or -1 for last, got {0}")]
    InvalidWeekOfMonth(i64),

    #[error("Duration must be a non-negative number of seconds, got {0}")]
    InvalidDuration(i64),
}

impl ValidationError {
    /// ## Summary
    /// Stable machine-readable code for the error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidFrequency => "invalid_frequency",
            Self::MissingStartDate => "missing_start_date",
            Self::MissingEndDate => "missing_end_date",
            Self::InvalidInterval => "invalid_interval",
            Self::MissingDaysOfWeek => "missing_days",
            Self::MissingMonthlyPattern => "missing_monthly_pattern",
            Self::MissingDates => "missing_dates",
            Self::UnknownWeekday(_) => "unknown_weekday",
            Self::InvalidWeekOfMonth(_) => "invalid_week_of_month",
            Self::InvalidDuration(_) => "invalid_duration",
        }
    }
}

/// ## Summary
/// A submission that passed every rule, together with its parsed frequency.
///
/// Only [`validated`] constructs this, so holding one proves validation ran.
#[derive(Debug, Clone, Copy)]
pub struct ValidSubmission<'a> {
    submission: &'a RecurrenceSubmission,
    frequency: Frequency,
}

impl<'a> ValidSubmission<'a> {
    #[must_use]
    pub const fn submission(&self) -> &'a RecurrenceSubmission {
        self.submission
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }
}

/// ## Summary
/// Checks a submission against the recurrence rules.
///
/// ## Errors
/// Returns the first rule violation, see [`validated`].
pub fn validate(submission: &RecurrenceSubmission) -> Result<(), ValidationError> {
    validated(submission).map(|_| ())
}

/// ## Summary
/// Validates a submission and returns proof of validity for the normalizer.
///
/// Rules, in order:
/// 1. `frequency` is weekly, monthly or specific
/// 2. weekly/monthly carry `start_date` and `end_date`
/// 3. `interval`, when given, is at least 1
/// 4. weekly names at least one known weekday
/// 5. monthly names a known weekday and a valid week of month
/// 6. specific lists at least one date
/// 7. `duration`, when given, is non-negative
///
/// ## Errors
/// Returns the `ValidationError` of the first failing rule.
pub fn validated(submission: &RecurrenceSubmission) -> Result<ValidSubmission<'_>, ValidationError> {
    let frequency = submission
        .frequency
        .as_deref()
        .ok_or(ValidationError::InvalidFrequency)?
        .parse::<Frequency>()
        .map_err(|err| {
            tracing::trace!(error = %err, "Rejected frequency");
            ValidationError::InvalidFrequency
        })?;

    if frequency.is_date_bounded() {
        if is_blank(submission.start_date.as_deref()) {
            return Err(ValidationError::MissingStartDate);
        }
        if is_blank(submission.end_date.as_deref()) {
            return Err(ValidationError::MissingEndDate);
        }
    }

    if let Some(interval) = submission.interval {
        if !u16::try_from(interval).is_ok_and(|n| n > 0) {
            return Err(ValidationError::InvalidInterval);
        }
    }

    match frequency {
        Frequency::Weekly => validate_weekly(submission)?,
        Frequency::Monthly => validate_monthly(submission)?,
        Frequency::Specific => validate_specific(submission)?,
    }

    if let Some(duration) = submission.duration {
        if u32::try_from(duration).is_err() {
            return Err(ValidationError::InvalidDuration(duration));
        }
    }

    tracing::trace!(%frequency, "Recurrence submission is valid");
    Ok(ValidSubmission {
        submission,
        frequency,
    })
}

fn validate_weekly(submission: &RecurrenceSubmission) -> Result<(), ValidationError> {
    let days = present_entries(submission.days_of_week.as_ref())
        .ok_or(ValidationError::MissingDaysOfWeek)?;

    if let Some(unknown) = days
        .into_iter()
        .find(|day| WeekdayCode::from_name(day).is_none())
    {
        return Err(ValidationError::UnknownWeekday(unknown.to_string()));
    }
    Ok(())
}

fn validate_monthly(submission: &RecurrenceSubmission) -> Result<(), ValidationError> {
    let (Some(day), Some(week)) = (submission.day_of_week.as_deref(), submission.week_of_month)
    else {
        return Err(ValidationError::MissingMonthlyPattern);
    };
    if day.trim().is_empty() {
        return Err(ValidationError::MissingMonthlyPattern);
    }

    if WeekdayCode::from_name(day).is_none() {
        return Err(ValidationError::UnknownWeekday(day.trim().to_string()));
    }

    let in_range = i8::try_from(week).is_ok_and(|week| {
        week == LAST_WEEK_OF_MONTH || (MIN_WEEK_OF_MONTH..=MAX_WEEK_OF_MONTH).contains(&week)
    });
    if !in_range {
        return Err(ValidationError::InvalidWeekOfMonth(week));
    }
    Ok(())
}

fn validate_specific(submission: &RecurrenceSubmission) -> Result<(), ValidationError> {
    present_entries(submission.dates.as_ref())
        .map(|_| ())
        .ok_or(ValidationError::MissingDates)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn present_entries(field: Option<&ListField>) -> Option<Vec<&str>> {
    field
        .map(ListField::entries)
        .filter(|entries| !entries.is_empty())
}
