/// A submission, the window it is expanded over, and the expected starts.
pub struct ExpansionCase {
    pub name: &'static str,
    pub submission: &'static str,
    pub window: (&'static str, &'static str),
    /// Instance starts formatted as `%Y-%m-%d %H:%M:%S`, in order.
    pub expected: &'static [&'static str],
    pub duration_seconds: i64,
}

pub const EXPANSION_CASES: &[ExpansionCase] = &[
    ExpansionCase {
        name: "weekly_mon_wed_two_weeks",
        submission: r#"{"frequency": "weekly", "start_date": "2025-01-01", "end_date": "2025-01-14",
            "days_of_week": ["monday", "wednesday"], "duration": 3600}"#,
        window: ("2025-01-01", "2025-01-31"),
        expected: &[
            "2025-01-01 00:00:00",
            "2025-01-06 00:00:00",
            "2025-01-08 00:00:00",
            "2025-01-13 00:00:00",
        ],
        duration_seconds: 3600,
    },
    ExpansionCase {
        name: "specific_two_dates",
        submission: r#"{"frequency": "specific", "dates": ["2025-03-01", "2025-03-15"], "duration": 1800}"#,
        window: ("2025-01-01", "2025-12-31"),
        expected: &["2025-03-01 00:00:00", "2025-03-15 00:00:00"],
        duration_seconds: 1800,
    },
    ExpansionCase {
        name: "monthly_fifth_friday_february",
        submission: r#"{"frequency": "monthly", "start_date": "2025-02-01", "end_date": "2025-02-28",
            "day_of_week": "friday", "week_of_month": 5}"#,
        window: ("2025-02-01", "2025-02-28"),
        expected: &[],
        duration_seconds: 3600,
    },
    ExpansionCase {
        name: "weekly_with_exclusion",
        submission: r#"{"frequency": "weekly", "start_date": "2025-01-01", "end_date": "2025-01-14",
            "days_of_week": ["monday", "wednesday"], "exclude_dates": ["2025-01-08"]}"#,
        window: ("2025-01-01", "2025-01-31"),
        expected: &[
            "2025-01-01 00:00:00",
            "2025-01-06 00:00:00",
            "2025-01-13 00:00:00",
        ],
        duration_seconds: 3600,
    },
    ExpansionCase {
        name: "weekly_every_other_week",
        submission: r#"{"frequency": "weekly", "interval": 2, "start_date": "2025-01-01",
            "end_date": "2025-01-31", "days_of_week": "monday,wednesday"}"#,
        window: ("2025-01-01", "2025-01-31"),
        expected: &[
            "2025-01-01 00:00:00",
            "2025-01-13 00:00:00",
            "2025-01-15 00:00:00",
            "2025-01-27 00:00:00",
            "2025-01-29 00:00:00",
        ],
        duration_seconds: 3600,
    },
    ExpansionCase {
        name: "weekly_start_time_carried",
        submission: r#"{"frequency": "weekly", "start_date": "2025-01-06 09:30", "end_date": "2025-01-20",
            "days_of_week": ["Monday"], "duration": 1800}"#,
        window: ("2025-01-01", "2025-01-31"),
        expected: &[
            "2025-01-06 09:30:00",
            "2025-01-13 09:30:00",
            "2025-01-20 09:30:00",
        ],
        duration_seconds: 1800,
    },
    ExpansionCase {
        name: "weekly_window_clips_pattern",
        submission: r#"{"frequency": "weekly", "start_date": "2025-01-01", "end_date": "2025-01-31",
            "days_of_week": ["monday", "wednesday"]}"#,
        window: ("2025-01-07", "2025-01-14"),
        expected: &["2025-01-08 00:00:00", "2025-01-13 00:00:00"],
        duration_seconds: 3600,
    },
    ExpansionCase {
        name: "monthly_fifth_friday_year",
        submission: r#"{"frequency": "monthly", "start_date": "2025-01-01", "end_date": "2025-12-31",
            "day_of_week": "friday", "week_of_month": 5}"#,
        window: ("2025-01-01", "2025-12-31"),
        expected: &[
            "2025-01-31 00:00:00",
            "2025-05-30 00:00:00",
            "2025-08-29 00:00:00",
            "2025-10-31 00:00:00",
        ],
        duration_seconds: 3600,
    },
    ExpansionCase {
        name: "monthly_last_friday_with_exclusion",
        submission: r#"{"frequency": "monthly", "start_date": "2025-01-01", "end_date": "2025-04-30",
            "day_of_week": "friday", "week_of_month": -1, "exclude_days": "2025-02-28"}"#,
        window: ("2025-01-01", "2025-12-31"),
        expected: &[
            "2025-01-31 00:00:00",
            "2025-03-28 00:00:00",
            "2025-04-25 00:00:00",
        ],
        duration_seconds: 3600,
    },
    ExpansionCase {
        name: "monthly_second_tuesday_every_other_month",
        submission: r#"{"frequency": "monthly", "interval": 2, "start_date": "2025-01-01 18:00",
            "end_date": "2025-06-30", "day_of_week": "tuesday", "week_of_month": 2, "duration": 7200}"#,
        window: ("2025-01-01", "2025-12-31"),
        expected: &[
            "2025-01-14 18:00:00",
            "2025-03-11 18:00:00",
            "2025-05-13 18:00:00",
        ],
        duration_seconds: 7200,
    },
    ExpansionCase {
        name: "specific_unsorted_and_out_of_window",
        submission: r#"{"frequency": "specific",
            "dates": ["2025-03-15", "2025-03-01 14:00", "2026-02-01", "2024-12-31"]}"#,
        window: ("2025-01-01", "2025-12-31"),
        expected: &["2025-03-01 14:00:00", "2025-03-15 00:00:00"],
        duration_seconds: 3600,
    },
    ExpansionCase {
        name: "specific_exclusion_by_date",
        submission: r#"{"frequency": "specific", "dates": "2025-03-01 09:00, 2025-03-02 09:00",
            "exclude_dates": ["2025-03-01"]}"#,
        window: ("2025-03-01", "2025-03-31"),
        expected: &["2025-03-02 09:00:00"],
        duration_seconds: 3600,
    },
];

pub fn case_window(case: &ExpansionCase) -> (chrono::NaiveDate, chrono::NaiveDate) {
    let parse = |raw: &str| {
        chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .unwrap_or_else(|err| panic!("{}: bad window date {raw}: {err}", case.name))
    };
    (parse(case.window.0), parse(case.window.1))
}

pub fn assert_instances(case: &ExpansionCase, instances: &[kairos_recur::Instance]) {
    let actual: Vec<String> = instances
        .iter()
        .map(|instance| instance.start.format("%Y-%m-%d %H:%M:%S").to_string())
        .collect();
    assert_eq!(actual, case.expected, "case {}", case.name);

    for instance in instances {
        assert_eq!(
            instance.duration().num_seconds(),
            case.duration_seconds,
            "case {}",
            case.name
        );
    }
}
