use kairos_core::types::{Frequency, PatternId};
use serde::{Deserialize, Serialize};

/// ## Summary
/// Public-facing representation of a stored pattern.
///
/// Weekday sets are rendered as comma-joined codes (`"1,3"`), matching what
/// API consumers already parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceView {
    pub id: PatternId,
    pub frequency: Frequency,
    pub interval: u16,
    /// Instance length in seconds.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week_codes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of_month: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_dates: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_dates: Option<Vec<String>>,
}
