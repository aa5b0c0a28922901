use std::collections::BTreeSet;

use chrono::TimeDelta;
use kairos_core::types::{Frequency, PatternId, WeekdayCode};
use serde::{Deserialize, Serialize};

use crate::error::RecurResult;
use crate::model::view::RecurrenceView;

/// ## Summary
/// Canonical, storage-ready recurrence pattern.
///
/// Produced by the normalizer from a validated submission. Only the fields
/// relevant to `frequency` are populated; the expander relies on this and
/// does not re-validate. Date fields hold sanitized text and are parsed at
/// expansion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    pub frequency: Frequency,
    /// Every N weeks or months. Unused for `Specific`.
    pub interval: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub days_of_week: BTreeSet<WeekdayCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<WeekdayCode>,
    /// 1 through 5, or -1 for the last occurrence in the month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of_month: Option<i8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_dates: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_dates: Vec<String>,
    pub duration_seconds: u32,
}

impl RecurrencePattern {
    /// Length of every generated instance.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.duration_seconds))
    }

    /// ## Summary
    /// Builds the public-facing representation of this pattern stored under `id`.
    #[must_use]
    pub fn view(&self, id: PatternId) -> RecurrenceView {
        let days_of_week_codes = match self.frequency {
            Frequency::Weekly => Some(join_codes(self.days_of_week.iter().copied())),
            Frequency::Monthly => self.day_of_week.map(|day| day.to_string()),
            Frequency::Specific => None,
        };

        RecurrenceView {
            id,
            frequency: self.frequency,
            interval: self.interval,
            duration: self.duration_seconds,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            days_of_week_codes,
            week_of_month: self.week_of_month,
            specific_dates: non_empty(&self.specific_dates),
            excluded_dates: non_empty(&self.exclude_dates),
        }
    }

    /// ## Summary
    /// Encodes the pattern for an external store.
    ///
    /// ## Errors
    /// Returns `RecurError::Encoding` if serialization fails.
    pub fn to_json(&self) -> RecurResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// ## Summary
    /// Decodes a pattern previously produced by [`RecurrencePattern::to_json`].
    ///
    /// ## Errors
    /// Returns `RecurError::Encoding` if the text is not a valid encoded pattern.
    pub fn from_json(text: &str) -> RecurResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn join_codes(codes: impl Iterator<Item = WeekdayCode>) -> String {
    codes
        .map(|code| code.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}
