use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};
use fellowship_schedule::recurrence::{
    MonthlyWeekInput, ProjectionWindow, RecurrenceSpec, TimeInput, build_monthly_by_date,
    build_weekly, monthly_by_week, project_occurrences,
};

pub struct ProjectionCase {
    pub name: &'static str,
    pub spec: fn() -> RecurrenceSpec,
    pub start: &'static str,
    pub end: &'static str,
    pub limit: u16,
    pub expected: &'static [&'static str],
}

fn weekly(days: &[Weekday]) -> RecurrenceSpec {
    let times = days
        .iter()
        .map(|day| (*day, TimeInput::new("09:00", "11:00")))
        .collect::<HashMap<_, _>>();
    build_weekly(days, &times).expect("valid weekly spec")
}

fn nth(weekday: Weekday, nth: i8) -> RecurrenceSpec {
    monthly_by_week(&[MonthlyWeekInput {
        weekday,
        nth,
        time: TimeInput::new("09:00", "11:00"),
    }])
    .expect("valid monthly spec")
}

fn by_day(day_of_month: u32) -> RecurrenceSpec {
    let anchor = NaiveDate::from_ymd_opt(2025, 1, day_of_month).expect("valid day");
    build_monthly_by_date(anchor, &TimeInput::new("18:00", "19:00")).expect("valid monthly spec")
}

pub fn projection_cases() -> Vec<ProjectionCase> {
    vec![
        ProjectionCase {
            name: "weekly_sunday_june",
            spec: || weekly(&[Weekday::Sun]),
            start: "2025-06-01",
            end: "2025-06-30",
            limit: 100,
            expected: &[
                "2025-06-01",
                "2025-06-08",
                "2025-06-15",
                "2025-06-22",
                "2025-06-29",
            ],
        },
        ProjectionCase {
            name: "weekly_two_days_interleave",
            spec: || weekly(&[Weekday::Wed, Weekday::Sun]),
            start: "2025-06-01",
            end: "2025-06-14",
            limit: 100,
            expected: &["2025-06-01", "2025-06-04", "2025-06-08", "2025-06-11"],
        },
        ProjectionCase {
            name: "weekly_start_mid_week",
            spec: || weekly(&[Weekday::Sun]),
            start: "2025-01-01",
            end: "2025-01-20",
            limit: 100,
            expected: &["2025-01-05", "2025-01-12", "2025-01-19"],
        },
        ProjectionCase {
            name: "weekly_limited",
            spec: || weekly(&[Weekday::Sun]),
            start: "2025-01-01",
            end: "2025-12-31",
            limit: 3,
            expected: &["2025-01-05", "2025-01-12", "2025-01-19"],
        },
        ProjectionCase {
            name: "third_sunday",
            spec: || nth(Weekday::Sun, 3),
            start: "2025-06-15",
            end: "2025-09-15",
            limit: 100,
            expected: &["2025-06-15", "2025-07-20", "2025-08-17"],
        },
        ProjectionCase {
            name: "last_sunday_inclusive_end",
            spec: || nth(Weekday::Sun, -1),
            start: "2025-06-01",
            end: "2025-08-31",
            limit: 100,
            expected: &["2025-06-29", "2025-07-27", "2025-08-31"],
        },
        ProjectionCase {
            name: "fifth_sunday_skips_short_months",
            spec: || nth(Weekday::Sun, 5),
            start: "2025-06-01",
            end: "2025-09-30",
            limit: 100,
            expected: &["2025-06-29", "2025-08-31"],
        },
        ProjectionCase {
            name: "thirty_first_skips_short_months",
            spec: || by_day(31),
            start: "2025-01-01",
            end: "2025-06-30",
            limit: 100,
            expected: &["2025-01-31", "2025-03-31", "2025-05-31"],
        },
        ProjectionCase {
            name: "fifteenth_after_start",
            spec: || by_day(15),
            start: "2025-06-20",
            end: "2025-09-20",
            limit: 100,
            expected: &["2025-07-15", "2025-08-15", "2025-09-15"],
        },
    ]
}

pub fn assert_case(case: &ProjectionCase) {
    let start = NaiveDate::parse_from_str(case.start, "%Y-%m-%d").expect("valid start");
    let end = NaiveDate::parse_from_str(case.end, "%Y-%m-%d").expect("valid end");
    let window = ProjectionWindow::new(start, end).with_limit(case.limit);

    let occurrences = project_occurrences(&(case.spec)(), &window)
        .unwrap_or_else(|err| panic!("{}: projection failed: {err}", case.name));

    let dates = occurrences
        .iter()
        .map(|occurrence| occurrence.date.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>();
    assert_eq!(dates, case.expected, "{}", case.name);
    assert!(
        occurrences.iter().all(|occurrence| !occurrence.has_attendance),
        "{}: projected occurrences start without attendance",
        case.name
    );
}
