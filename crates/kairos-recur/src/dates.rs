//! Lenient parsing of the free-text dates stored on a pattern.
//!
//! Stored dates are sanitized text, not validated values, so every caller
//! gets an `Option` and decides how to report a malformed entry.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// ## Summary
/// Parses `YYYY-MM-DD` or `YYYY-MM-DD[ T]HH:MM[:SS]`.
///
/// Date-only values resolve to midnight.
#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// ## Summary
/// Parses a stored value down to its calendar date, discarding any time of day.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date())
}

/// Last representable second of `date`.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(23, 59, 59)
}
