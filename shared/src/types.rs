//! Common types used across the platform

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A date window for rollups and filtered queries.
///
/// Both endpoints are inclusive: a record dated exactly on `start` or `end`
/// falls inside the window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether the date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The trailing window ending today: [today - n, today]
    pub fn last_n_days(today: NaiveDate, n: i64) -> Self {
        Self {
            start: today - Duration::days(n),
            end: today,
        }
    }

    /// From the first of the current month through today
    pub fn month_to_date(today: NaiveDate) -> Self {
        // day0 is zero-based, so subtracting it lands on the 1st
        Self {
            start: today - Duration::days(i64::from(today.day0())),
            end: today,
        }
    }

    /// From January 1st through today
    pub fn year_to_date(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(i64::from(today.ordinal0())),
            end: today,
        }
    }

    /// The whole calendar month before the one containing `today`
    pub fn previous_month(today: NaiveDate) -> Self {
        let month_start = today - Duration::days(i64::from(today.day0()));
        let end = month_start - Duration::days(1);
        Self {
            start: end - Duration::days(i64::from(end.day0())),
            end,
        }
    }
}
