//! Human-readable recurrence submission, as forwarded by the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::error::RecurResult;

/// ## Summary
/// A list-valued field that callers send either as a JSON array or as one
/// comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    Items(Vec<String>),
    Joined(String),
}

impl ListField {
    /// ## Summary
    /// Returns the trimmed, non-blank entries in submitted order.
    #[must_use]
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::Items(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect(),
            Self::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }

    /// True when the field carries no usable entry.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.entries().is_empty()
    }
}

impl<const N: usize> From<[&str; N]> for ListField {
    fn from(items: [&str; N]) -> Self {
        Self::Items(items.iter().map(ToString::to_string).collect())
    }
}

impl From<&str> for ListField {
    fn from(joined: &str) -> Self {
        Self::Joined(joined.to_string())
    }
}

/// ## Summary
/// Recurrence definition exactly as submitted, before validation.
///
/// Every field is optional so that the validator, not deserialization,
/// decides which ones are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceSubmission {
    pub frequency: Option<String>,
    pub interval: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub days_of_week: Option<ListField>,
    pub day_of_week: Option<String>,
    pub week_of_month: Option<i64>,
    pub dates: Option<ListField>,
    #[serde(alias = "exclude_days")]
    pub exclude_dates: Option<ListField>,
    /// Instance length in seconds.
    pub duration: Option<i64>,
}

impl RecurrenceSubmission {
    /// ## Summary
    /// Decodes a submission from a JSON object.
    ///
    /// ## Errors
    /// Returns `RecurError::Encoding` if the text is not a JSON object with
    /// fields of the expected JSON types.
    pub fn from_json(text: &str) -> RecurResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
