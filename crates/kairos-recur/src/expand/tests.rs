use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use kairos_core::types::{Frequency, WeekdayCode};

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

fn pattern(frequency: Frequency) -> RecurrencePattern {
    RecurrencePattern {
        frequency,
        interval: 1,
        start_date: None,
        end_date: None,
        days_of_week: BTreeSet::new(),
        day_of_week: None,
        week_of_month: None,
        specific_dates: Vec::new(),
        exclude_dates: Vec::new(),
        duration_seconds: 3600,
    }
}

fn weekly(start: &str, end: &str, days: &[WeekdayCode]) -> RecurrencePattern {
    RecurrencePattern {
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
        days_of_week: days.iter().copied().collect(),
        ..pattern(Frequency::Weekly)
    }
}

fn monthly(start: &str, end: &str, day: WeekdayCode, week: i8) -> RecurrencePattern {
    RecurrencePattern {
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
        day_of_week: Some(day),
        week_of_month: Some(week),
        ..pattern(Frequency::Monthly)
    }
}

fn specific(dates: &[&str]) -> RecurrencePattern {
    RecurrencePattern {
        specific_dates: dates.iter().map(ToString::to_string).collect(),
        ..pattern(Frequency::Specific)
    }
}

fn starts(instances: &[Instance]) -> Vec<NaiveDateTime> {
    instances.iter().map(|instance| instance.start).collect()
}

fn mon_wed() -> RecurrencePattern {
    weekly(
        "2025-01-01",
        "2025-01-14",
        &[WeekdayCode::MONDAY, WeekdayCode::WEDNESDAY],
    )
}

#[test_log::test]
fn weekly_mon_wed_two_weeks() {
    let instances = expand(&mon_wed(), date(2025, 1, 1), date(2025, 1, 31));
    assert_eq!(
        starts(&instances),
        vec![
            at(2025, 1, 1, 0, 0),
            at(2025, 1, 6, 0, 0),
            at(2025, 1, 8, 0, 0),
            at(2025, 1, 13, 0, 0),
        ]
    );
    for instance in &instances {
        assert_eq!(instance.duration(), TimeDelta::hours(1));
    }
}

#[test_log::test]
fn weekly_instances_fall_on_selected_days() {
    let pattern = weekly(
        "2025-01-01",
        "2025-06-30",
        &[WeekdayCode::TUESDAY, WeekdayCode::SATURDAY],
    );
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 12, 31));
    assert!(!instances.is_empty());
    for instance in &instances {
        let code = WeekdayCode::from_weekday(instance.start.weekday());
        assert!(pattern.days_of_week.contains(&code), "{instance:?}");
        assert!(instance.start.date() >= date(2025, 1, 1));
        assert!(instance.start.date() <= date(2025, 6, 30));
    }
}

#[test_log::test]
fn weekly_interval_skips_weeks() {
    let pattern = RecurrencePattern {
        interval: 2,
        ..weekly(
            "2025-01-01",
            "2025-01-31",
            &[WeekdayCode::MONDAY, WeekdayCode::WEDNESDAY],
        )
    };
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 1, 31));
    assert_eq!(
        starts(&instances),
        vec![
            at(2025, 1, 1, 0, 0),
            at(2025, 1, 13, 0, 0),
            at(2025, 1, 15, 0, 0),
            at(2025, 1, 27, 0, 0),
            at(2025, 1, 29, 0, 0),
        ]
    );
}

#[test_log::test]
fn weekly_start_time_applies_to_every_instance() {
    let pattern = RecurrencePattern {
        duration_seconds: 1800,
        ..weekly("2025-01-06 09:30", "2025-01-20", &[WeekdayCode::MONDAY])
    };
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 1, 31));
    assert_eq!(
        starts(&instances),
        vec![
            at(2025, 1, 6, 9, 30),
            at(2025, 1, 13, 9, 30),
            at(2025, 1, 20, 9, 30),
        ]
    );
    assert_eq!(instances[2].end, at(2025, 1, 20, 10, 0));
}

#[test_log::test]
fn window_narrower_than_pattern() {
    let instances = expand(&mon_wed(), date(2025, 1, 7), date(2025, 1, 13));
    assert_eq!(
        starts(&instances),
        vec![at(2025, 1, 8, 0, 0), at(2025, 1, 13, 0, 0)]
    );
}

#[test_log::test]
fn window_outside_pattern_is_empty() {
    assert!(expand(&mon_wed(), date(2025, 2, 1), date(2025, 2, 28)).is_empty());
    assert!(expand(&mon_wed(), date(2024, 1, 1), date(2024, 12, 31)).is_empty());
}

#[test_log::test]
fn inverted_window_is_empty() {
    assert!(expand(&mon_wed(), date(2025, 1, 31), date(2025, 1, 1)).is_empty());
    let pattern = specific(&["2025-01-10"]);
    assert!(expand(&pattern, date(2025, 1, 31), date(2025, 1, 1)).is_empty());
}

#[test_log::test]
fn weekly_exclusion_removes_one_day() {
    let pattern = RecurrencePattern {
        exclude_dates: vec!["2025-01-08".to_string()],
        ..mon_wed()
    };
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 1, 31));
    assert_eq!(
        starts(&instances),
        vec![
            at(2025, 1, 1, 0, 0),
            at(2025, 1, 6, 0, 0),
            at(2025, 1, 13, 0, 0),
        ]
    );
}

#[test_log::test]
fn malformed_exclusion_is_ignored() {
    let pattern = RecurrencePattern {
        exclude_dates: vec!["next tuesday".to_string()],
        ..mon_wed()
    };
    assert_eq!(
        expand(&pattern, date(2025, 1, 1), date(2025, 1, 31)).len(),
        4
    );
}

#[test_log::test]
fn monthly_fifth_friday_missing_in_february() {
    let pattern = monthly("2025-02-01", "2025-02-28", WeekdayCode::FRIDAY, 5);
    assert!(expand(&pattern, date(2025, 2, 1), date(2025, 2, 28)).is_empty());
}

#[test_log::test]
fn monthly_fifth_friday_only_in_long_months() {
    let pattern = monthly("2025-01-01", "2025-12-31", WeekdayCode::FRIDAY, 5);
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 12, 31));
    assert_eq!(
        starts(&instances),
        vec![
            at(2025, 1, 31, 0, 0),
            at(2025, 5, 30, 0, 0),
            at(2025, 8, 29, 0, 0),
            at(2025, 10, 31, 0, 0),
        ]
    );
}

#[test_log::test]
fn monthly_last_friday() {
    let pattern = monthly("2025-01-01", "2025-04-30", WeekdayCode::FRIDAY, -1);
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 12, 31));
    assert_eq!(
        starts(&instances),
        vec![
            at(2025, 1, 31, 0, 0),
            at(2025, 2, 28, 0, 0),
            at(2025, 3, 28, 0, 0),
            at(2025, 4, 25, 0, 0),
        ]
    );
}

#[test_log::test]
fn monthly_interval_with_start_time() {
    let pattern = RecurrencePattern {
        interval: 2,
        ..monthly("2025-01-01 18:00", "2025-06-30", WeekdayCode::TUESDAY, 2)
    };
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 12, 31));
    assert_eq!(
        starts(&instances),
        vec![
            at(2025, 1, 14, 18, 0),
            at(2025, 3, 11, 18, 0),
            at(2025, 5, 13, 18, 0),
        ]
    );
}

#[test_log::test]
fn specific_dates_sorted_and_malformed_skipped() {
    let pattern = RecurrencePattern {
        duration_seconds: 1800,
        ..specific(&["2025-03-15", "not a date", "2025-03-01 14:00", "2026-02-01"])
    };
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 12, 31));
    assert_eq!(
        starts(&instances),
        vec![at(2025, 3, 1, 14, 0), at(2025, 3, 15, 0, 0)]
    );
    assert_eq!(instances[0].end, at(2025, 3, 1, 14, 30));
}

#[test_log::test]
fn specific_duplicates_are_kept() {
    let pattern = specific(&["2025-03-01 09:00", "2025-03-01 09:00"]);
    let instances = expand(&pattern, date(2025, 3, 1), date(2025, 3, 1));
    assert_eq!(instances.len(), 2);
}

#[test_log::test]
fn specific_exclusion_matches_by_date() {
    let pattern = RecurrencePattern {
        exclude_dates: vec!["2025-03-01".to_string()],
        ..specific(&["2025-03-01 09:00", "2025-03-02 09:00"])
    };
    let instances = expand(&pattern, date(2025, 3, 1), date(2025, 3, 31));
    assert_eq!(starts(&instances), vec![at(2025, 3, 2, 9, 0)]);
}

#[test_log::test]
fn malformed_start_date_yields_nothing() {
    let pattern = weekly("someday", "2025-01-31", &[WeekdayCode::MONDAY]);
    assert!(expand(&pattern, date(2025, 1, 1), date(2025, 1, 31)).is_empty());

    let pattern = weekly("2025-01-01", "", &[WeekdayCode::MONDAY]);
    assert!(expand(&pattern, date(2025, 1, 1), date(2025, 1, 31)).is_empty());
}

#[test_log::test]
fn weekly_without_days_yields_nothing() {
    let pattern = weekly("2025-01-01", "2025-01-31", &[]);
    assert!(expand(&pattern, date(2025, 1, 1), date(2025, 1, 31)).is_empty());
}

#[test_log::test]
fn max_instances_truncates() {
    let expander = Expander::new(ExpansionOptions { max_instances: 3 });
    let window = ExpansionWindow::new(date(2025, 1, 1), date(2025, 1, 31));
    assert_eq!(
        starts(&expander.expand(&mon_wed(), window)),
        vec![
            at(2025, 1, 1, 0, 0),
            at(2025, 1, 6, 0, 0),
            at(2025, 1, 8, 0, 0),
        ]
    );

    let pattern = specific(&["2025-01-04", "2025-01-03", "2025-01-02", "2025-01-01"]);
    assert_eq!(
        starts(&expander.expand(&pattern, window)),
        vec![
            at(2025, 1, 1, 0, 0),
            at(2025, 1, 2, 0, 0),
            at(2025, 1, 3, 0, 0),
        ]
    );
}

#[test_log::test]
fn limit_counts_only_occurrences_inside_window() {
    let pattern = weekly("2020-01-01", "2030-12-31", &[WeekdayCode::MONDAY]);
    let expander = Expander::new(ExpansionOptions { max_instances: 10 });
    let window = ExpansionWindow::new(date(2025, 1, 1), date(2025, 12, 31));

    assert_eq!(
        starts(&expander.expand(&pattern, window)),
        vec![
            at(2025, 1, 6, 0, 0),
            at(2025, 1, 13, 0, 0),
            at(2025, 1, 20, 0, 0),
            at(2025, 1, 27, 0, 0),
            at(2025, 2, 3, 0, 0),
            at(2025, 2, 10, 0, 0),
            at(2025, 2, 17, 0, 0),
            at(2025, 2, 24, 0, 0),
            at(2025, 3, 3, 0, 0),
            at(2025, 3, 10, 0, 0),
        ]
    );
}

#[test_log::test]
fn long_running_daily_pattern_expands_late_window() {
    let every_day = [
        WeekdayCode::SUNDAY,
        WeekdayCode::MONDAY,
        WeekdayCode::TUESDAY,
        WeekdayCode::WEDNESDAY,
        WeekdayCode::THURSDAY,
        WeekdayCode::FRIDAY,
        WeekdayCode::SATURDAY,
    ];
    let pattern = weekly("1800-01-01", "2099-12-31", &every_day);
    let instances = expand(&pattern, date(2025, 1, 1), date(2025, 1, 31));

    assert_eq!(instances.len(), 31);
    assert_eq!(instances[0].start, at(2025, 1, 1, 0, 0));
    assert_eq!(instances[30].start, at(2025, 1, 31, 0, 0));
}

#[test_log::test]
fn expansion_is_repeatable() {
    let pattern = monthly("2025-01-01", "2025-12-31", WeekdayCode::MONDAY, 1);
    let window = ExpansionWindow::new(date(2025, 1, 1), date(2025, 12, 31));
    let expander = Expander::default();
    let first = expander.expand(&pattern, window);
    assert_eq!(first.len(), 12);
    assert_eq!(first, expander.expand(&pattern, window));
}

#[test]
fn options_follow_config() {
    let config = kairos_core::config::ExpansionConfig {
        max_instances: 10,
        ..Default::default()
    };
    assert_eq!(ExpansionOptions::from(&config).max_instances, 10);
    assert_eq!(
        Expander::default().options().max_instances,
        kairos_core::constants::DEFAULT_MAX_INSTANCES
    );
}

#[test]
fn ordinal_matching() {
    assert!(is_ordinal_in_month(date(2025, 1, 31), -1));
    assert!(!is_ordinal_in_month(date(2025, 1, 24), -1));
    assert!(is_ordinal_in_month(date(2025, 1, 31), 5));
    assert!(is_ordinal_in_month(date(2025, 1, 14), 2));
    assert!(!is_ordinal_in_month(date(2025, 1, 14), 3));
}
