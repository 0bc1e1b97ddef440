//! Viewed-month value type and month navigation.

use crate::calendar::CalendarError;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const TITLE_FORMAT: &str = "%B %Y";

/// A Gregorian year and month, e.g. 2024-03.
///
/// Always addresses a representable month, so day 1 exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthKey", into = "MonthKey")]
pub struct YearMonth {
    first: NaiveDate,
}

/// Wire shape for `YearMonth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl TryFrom<MonthKey> for YearMonth {
    type Error = CalendarError;

    fn try_from(value: MonthKey) -> Result<Self, Self::Error> {
        YearMonth::new(value.year, value.month)
    }
}

impl From<YearMonth> for MonthKey {
    fn from(value: YearMonth) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
        }
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(CalendarError::YearOutOfRange(year))
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Date for `day` of this month.
    pub fn day(self, day: u32) -> Result<NaiveDate, CalendarError> {
        self.first
            .with_day(day)
            .ok_or(CalendarError::InvalidDate {
                year: self.year(),
                month: self.month(),
                day,
            })
    }

    /// Number of days, leap years included.
    pub fn days_in_month(self) -> u32 {
        // Day before the first of next month; December always has 31.
        match self.first.checked_add_months(Months::new(1)) {
            Some(next_first) => next_first
                .pred_opt()
                .map_or(31, |last| last.day()),
            None => 31,
        }
    }

    /// Moves by `delta` months, rolling the year over as needed.
    pub fn shifted(self, delta: i32) -> Result<Self, CalendarError> {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };
        moved
            .map(|first| Self { first })
            .ok_or(CalendarError::YearOutOfRange(self.year()))
    }

    pub fn next(self) -> Result<Self, CalendarError> {
        self.shifted(1)
    }

    pub fn previous(self) -> Result<Self, CalendarError> {
        self.shifted(-1)
    }

    /// Header text such as `March 2024`.
    pub fn title(self) -> String {
        self.first.format(TITLE_FORMAT).to_string()
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
