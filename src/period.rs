use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A named calendar window used to filter order counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
    #[default]
    AllTime,
}

impl Period {
    pub const ALL: [Period; 9] = [
        Period::Today,
        Period::Yesterday,
        Period::ThisWeek,
        Period::LastWeek,
        Period::ThisMonth,
        Period::LastMonth,
        Period::ThisYear,
        Period::LastYear,
        Period::AllTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::ThisWeek => "this-week",
            Period::LastWeek => "last-week",
            Period::ThisMonth => "this-month",
            Period::LastMonth => "last-month",
            Period::ThisYear => "this-year",
            Period::LastYear => "last-year",
            Period::AllTime => "all-time",
        }
    }

    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(|period| period.as_str()).collect()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown period '{0}'")]
pub struct UnknownPeriod(pub String);

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == value)
            .ok_or_else(|| UnknownPeriod(value.to_string()))
    }
}

/// Half-open `[start, end)` creation-time window in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// RFC 3339 rendering with an explicit `+00:00` offset.
    pub fn start_iso(&self) -> String {
        self.start.to_rfc3339()
    }

    pub fn end_iso(&self) -> String {
        self.end.to_rfc3339()
    }
}

pub fn resolve_now(period: Period) -> Option<DateRange> {
    resolve(period, Utc::now())
}

/// Maps a period to its window relative to `now`. `AllTime` has no bounds.
pub fn resolve(period: Period, now: DateTime<Utc>) -> Option<DateRange> {
    let today = now.date_naive();
    let day_start = midnight(today);
    let week_start = day_start - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let first_of_this_month = first_of_month(today);
    let first_of_this_year = first_of_year(today);
    let month_start = midnight(first_of_this_month);
    let year_start = midnight(first_of_this_year);

    let (start, end) = match period {
        Period::Today => (day_start, now),
        Period::Yesterday => (day_start - Duration::days(1), day_start),
        Period::ThisWeek => (week_start, now),
        Period::LastWeek => (week_start - Duration::days(7), week_start),
        Period::ThisMonth => (month_start, now),
        Period::LastMonth => {
            let last_month = first_of_month(first_of_this_month - Duration::days(1));
            (midnight(last_month), month_start)
        }
        Period::ThisYear => (year_start, now),
        Period::LastYear => {
            let last_year = first_of_year(first_of_this_year - Duration::days(1));
            (midnight(last_year), year_start)
        }
        Period::AllTime => return None,
    };

    Some(DateRange { start, end })
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.ordinal0()))
}
