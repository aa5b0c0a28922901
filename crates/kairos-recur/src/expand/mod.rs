//! Instance expansion for stored recurrence patterns.
//!
//! Weekly and monthly patterns are compiled to RRULE text and expanded with
//! the `rrule` crate; specific-date patterns are parsed entry by entry.
//! Exclusions, ordering and the instance cap are applied the same way for
//! every frequency.

mod rule;
mod window;

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use kairos_core::config::ExpansionConfig;
use kairos_core::constants::{DEFAULT_MAX_INSTANCES, LAST_WEEK_OF_MONTH};
use kairos_core::types::{Frequency, WeekdayCode};
use rrule::{RRule, Tz, Unvalidated};

use crate::dates::{end_of_day, parse_date, parse_datetime};
use crate::model::{Instance, RecurrencePattern};

pub use rule::rrule_text;
pub use window::ExpansionWindow;

/// Tuning knobs for an [`Expander`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Maximum number of instances returned by one expansion.
    pub max_instances: u16,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}

impl From<&ExpansionConfig> for ExpansionOptions {
    fn from(config: &ExpansionConfig) -> Self {
        Self {
            max_instances: config.max_instances,
        }
    }
}

/// ## Summary
/// Turns a canonical pattern plus a window into concrete instances.
///
/// The expander borrows the pattern for the duration of one call and keeps
/// no state between calls, so one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expander {
    options: ExpansionOptions,
}

impl Expander {
    #[must_use]
    pub const fn new(options: ExpansionOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> ExpansionOptions {
        self.options
    }

    /// ## Summary
    /// Expands `pattern` into the instances that start inside `window`.
    ///
    /// The window is intersected with the pattern's own date bounds. Instances
    /// whose start date is listed in `exclude_dates` are dropped. The result is
    /// sorted by start time (stable for equal starts) and capped at
    /// `max_instances`.
    ///
    /// Malformed stored dates never fail the call: a bad specific date skips
    /// that instance, a bad weekly/monthly bound skips the pattern, and a bad
    /// exclusion is ignored. Each case is logged as a warning.
    ///
    /// ## Side Effects
    /// None beyond logging.
    #[must_use]
    pub fn expand(&self, pattern: &RecurrencePattern, window: ExpansionWindow) -> Vec<Instance> {
        let duration = pattern.duration();
        let mut instances = match pattern.frequency {
            Frequency::Weekly | Frequency::Monthly => {
                self.rule_instances(pattern, window, duration)
            }
            Frequency::Specific => specific_instances(pattern, window, duration),
        };

        let excluded = excluded_dates(pattern);
        if !excluded.is_empty() {
            let before = instances.len();
            instances.retain(|instance| !excluded.contains(&instance.start.date()));
            tracing::trace!(
                removed = before - instances.len(),
                "Applied excluded dates"
            );
        }

        instances.sort_by_key(|instance| instance.start);

        let limit = usize::from(self.options.max_instances);
        if instances.len() > limit {
            tracing::warn!(
                generated = instances.len(),
                limit,
                "Truncating expansion to the instance limit"
            );
            instances.truncate(limit);
        }

        tracing::debug!(
            frequency = %pattern.frequency,
            window_start = %window.start,
            window_end = %window.end,
            count = instances.len(),
            "Expanded recurrence pattern"
        );
        instances
    }

    fn rule_instances(
        &self,
        pattern: &RecurrencePattern,
        window: ExpansionWindow,
        duration: TimeDelta,
    ) -> Vec<Instance> {
        let Some((dtstart, last_date)) = rule_bounds(pattern) else {
            return Vec::new();
        };
        let Some(window) = window.intersect(dtstart.date(), last_date) else {
            tracing::trace!("Window does not overlap the pattern range");
            return Vec::new();
        };
        let Some(until) = end_of_day(window.end) else {
            return Vec::new();
        };
        let Some(rule_text) = rrule_text(pattern, until) else {
            tracing::warn!(
                frequency = %pattern.frequency,
                "Pattern lacks the fields its frequency requires, skipping"
            );
            return Vec::new();
        };
        tracing::trace!(rrule = %rule_text, dtstart = %dtstart, "Compiled recurrence rule");

        let rrule = match rule_text.parse::<RRule<Unvalidated>>() {
            Ok(rrule) => rrule,
            Err(err) => {
                tracing::warn!(rrule = %rule_text, error = %err, "Failed to parse compiled RRULE");
                return Vec::new();
            }
        };
        let mut rrule_set = match rrule.build(dtstart.and_utc().with_timezone(&Tz::UTC)) {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!(rrule = %rule_text, error = %err, "Failed to build recurrence set");
                return Vec::new();
            }
        };

        // The instance limit only counts occurrences on or after the window start.
        if let Some(inclusive_start) = window
            .start
            .and_time(NaiveTime::MIN)
            .checked_sub_signed(TimeDelta::seconds(1))
        {
            rrule_set = rrule_set.after(inclusive_start.and_utc().with_timezone(&Tz::UTC));
        }

        let result = rrule_set.all(self.options.max_instances);
        if result.limited {
            tracing::warn!(
                limit = self.options.max_instances,
                "Recurrence rule hit the instance limit"
            );
        }

        result
            .dates
            .iter()
            .map(|occurrence| occurrence.naive_utc())
            .filter(|start| window.contains(start.date()))
            .filter(|start| occurs_on(pattern, start.date()))
            .filter_map(|start| instance_at(start, duration))
            .collect()
    }
}

/// ## Summary
/// Expands `pattern` over `[window_start, window_end]` with default options.
#[must_use]
pub fn expand(
    pattern: &RecurrencePattern,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<Instance> {
    Expander::default().expand(pattern, ExpansionWindow::new(window_start, window_end))
}

/// First start (with time of day) and last date of a weekly/monthly pattern.
fn rule_bounds(pattern: &RecurrencePattern) -> Option<(NaiveDateTime, NaiveDate)> {
    let raw_start = pattern.start_date.as_deref().unwrap_or_default();
    let Some(start) = parse_datetime(raw_start) else {
        tracing::warn!(start_date = %raw_start, "Skipping pattern with malformed start date");
        return None;
    };

    let raw_end = pattern.end_date.as_deref().unwrap_or_default();
    let Some(end) = parse_date(raw_end) else {
        tracing::warn!(end_date = %raw_end, "Skipping pattern with malformed end date");
        return None;
    };

    Some((start, end))
}

/// Whether `date` satisfies the weekday (and, for monthly, ordinal) rule.
fn occurs_on(pattern: &RecurrencePattern, date: NaiveDate) -> bool {
    let weekday = WeekdayCode::from_weekday(date.weekday());
    let matches = match pattern.frequency {
        Frequency::Weekly => pattern.days_of_week.contains(&weekday),
        Frequency::Monthly => {
            pattern.day_of_week == Some(weekday)
                && pattern
                    .week_of_month
                    .is_some_and(|ordinal| is_ordinal_in_month(date, ordinal))
        }
        Frequency::Specific => true,
    };
    if !matches {
        tracing::trace!(%date, "Dropping rule occurrence outside the pattern");
    }
    matches
}

fn is_ordinal_in_month(date: NaiveDate, ordinal: i8) -> bool {
    if ordinal == LAST_WEEK_OF_MONTH {
        return date
            .checked_add_signed(TimeDelta::days(7))
            .is_none_or(|next| next.month() != date.month());
    }
    u32::try_from(ordinal).is_ok_and(|ordinal| (date.day() - 1) / 7 + 1 == ordinal)
}

fn specific_instances(
    pattern: &RecurrencePattern,
    window: ExpansionWindow,
    duration: TimeDelta,
) -> Vec<Instance> {
    pattern
        .specific_dates
        .iter()
        .filter_map(|raw| {
            let Some(start) = parse_datetime(raw) else {
                tracing::warn!(date = %raw, "Skipping malformed specific date");
                return None;
            };
            window.contains(start.date()).then_some(start)
        })
        .filter_map(|start| instance_at(start, duration))
        .collect()
}

fn excluded_dates(pattern: &RecurrencePattern) -> HashSet<NaiveDate> {
    pattern
        .exclude_dates
        .iter()
        .filter_map(|raw| {
            let date = parse_date(raw);
            if date.is_none() {
                tracing::warn!(date = %raw, "Ignoring malformed excluded date");
            }
            date
        })
        .collect()
}

fn instance_at(start: NaiveDateTime, duration: TimeDelta) -> Option<Instance> {
    let instance = Instance::starting_at(start, duration);
    if instance.is_none() {
        tracing::warn!(%start, "Skipping instance whose end is out of range");
    }
    instance
}

#[cfg(test)]
mod tests;
