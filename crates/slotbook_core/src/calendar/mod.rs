//! Monthly calendar layout and per-day occupancy projection.
//!
//! # Responsibility
//! - Describe the viewed month and move it one month at a time.
//! - Compute the Sunday-first grid layout of a month.
//! - Project a `ScheduleSet` onto the days of a month.
//!
//! # Invariants
//! - Grid layout depends only on year and month.
//! - Projection preserves `ScheduleSet` order and never re-sorts.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod grid;
pub mod month;
pub mod projector;

/// Calendar addressing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    InvalidMonth(u32),
    InvalidDate { year: i32, month: u32, day: u32 },
    YearOutOfRange(i32),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "month must be within 1..=12, got {month}"),
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid calendar date {year:04}-{month:02}-{day:02}")
            }
            Self::YearOutOfRange(year) => write!(f, "year {year} is outside the supported range"),
        }
    }
}

impl Error for CalendarError {}
