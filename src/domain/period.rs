use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Width of a chart bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// Normalizes a date to the first day of the period containing it.
    /// Weeks anchor on Monday (ISO).
    pub fn anchor(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                let delta = date.weekday().num_days_from_monday() as i64;
                date - Duration::days(delta)
            }
            Granularity::Month => date.with_day(1).unwrap(),
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap(),
        }
    }

    /// Anchor of the period immediately before the given anchor.
    pub fn previous(&self, anchor: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => anchor - Duration::days(1),
            Granularity::Week => anchor - Duration::weeks(1),
            Granularity::Month => shift_month(anchor, -1),
            Granularity::Year => shift_year(anchor, -1),
        }
    }

    /// Chart label for a period anchor.
    pub fn label(&self, anchor: NaiveDate) -> String {
        match self {
            Granularity::Day => anchor.format("%Y-%m-%d").to_string(),
            Granularity::Week => {
                let week = anchor.iso_week();
                format!("W{:02} {}", week.week(), week.year())
            }
            Granularity::Month => anchor.format("%b %Y").to_string(),
            Granularity::Year => anchor.format("%Y").to_string(),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
