//! Compiles weekly and monthly patterns into RRULE text for the `rrule` crate.

use chrono::NaiveDateTime;
use kairos_core::types::{Frequency, WeekdayCode};

use crate::model::RecurrencePattern;

const UNTIL_FORMAT: &str = "%Y%m%dT%H%M%SZ";

fn byday_code(day: WeekdayCode) -> &'static str {
    match day.code() {
        0 => "SU",
        1 => "MO",
        2 => "TU",
        3 => "WE",
        4 => "TH",
        5 => "FR",
        _ => "SA",
    }
}

/// ## Summary
/// Builds the RRULE value for a weekly or monthly pattern ending at `until` (UTC).
///
/// Weeks start on Sunday so that `interval` counts weeks the same way the
/// weekday codes do.
///
/// Returns `None` for `Specific` patterns and for patterns missing the
/// fields their frequency requires.
#[must_use]
pub fn rrule_text(pattern: &RecurrencePattern, until: NaiveDateTime) -> Option<String> {
    let until = until.format(UNTIL_FORMAT);
    match pattern.frequency {
        Frequency::Weekly => {
            if pattern.days_of_week.is_empty() {
                return None;
            }
            let byday = pattern
                .days_of_week
                .iter()
                .map(|day| byday_code(*day))
                .collect::<Vec<_>>()
                .join(",");
            Some(format!(
                "FREQ=WEEKLY;INTERVAL={};WKST=SU;BYDAY={byday};UNTIL={until}",
                pattern.interval
            ))
        }
        Frequency::Monthly => {
            let day = pattern.day_of_week?;
            let ordinal = pattern.week_of_month?;
            Some(format!(
                "FREQ=MONTHLY;INTERVAL={};BYDAY={ordinal}{};UNTIL={until}",
                pattern.interval,
                byday_code(day)
            ))
        }
        Frequency::Specific => None,
    }
}
