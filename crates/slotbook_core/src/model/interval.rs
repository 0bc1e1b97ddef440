//! Admitted reservation interval.
//!
//! # Responsibility
//! - Define the canonical record stored in a `ScheduleSet`.
//! - Provide calendar-date helpers used by conflict checks and projection.
//!
//! # Invariants
//! - `end > start` strictly; constructors and deserialization reject anything else.
//! - `id` is assigned once at admission and never reused.

use crate::model::draft::Candidate;
use crate::model::Instant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unique, monotonically assigned interval identifier.
///
/// Used only for keying and deletion; ordering lives on `start`.
pub type IntervalId = u64;

const LABEL_TIME_FORMAT: &str = "%H:%M";

/// Interval construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    InvalidWindow { start: Instant, end: Instant },
}

impl Display for IntervalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWindow { start, end } => {
                write!(f, "interval end ({end}) must be after start ({start})")
            }
        }
    }
}

impl Error for IntervalError {}

/// Reservation held by one owner between two instants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalWire")]
pub struct Interval {
    pub id: IntervalId,
    /// Owner name, keyed against the roster.
    pub owner: String,
    pub start: Instant,
    pub end: Instant,
}

#[derive(Deserialize)]
struct IntervalWire {
    id: IntervalId,
    owner: String,
    start: Instant,
    end: Instant,
}

impl TryFrom<IntervalWire> for Interval {
    type Error = IntervalError;

    fn try_from(value: IntervalWire) -> Result<Self, Self::Error> {
        Interval::from_parts(value.id, value.owner, value.start, value.end)
    }
}

impl Interval {
    /// Admits a candidate under the given id.
    pub fn new(id: IntervalId, candidate: Candidate) -> Result<Self, IntervalError> {
        Self::from_parts(id, candidate.owner, candidate.start, candidate.end)
    }

    /// Builds an interval from raw parts, enforcing `end > start`.
    pub fn from_parts(
        id: IntervalId,
        owner: impl Into<String>,
        start: Instant,
        end: Instant,
    ) -> Result<Self, IntervalError> {
        if end <= start {
            return Err(IntervalError::InvalidWindow { start, end });
        }
        Ok(Self {
            id,
            owner: owner.into(),
            start,
            end,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Whether `date` lies within `[start date, end date]`, time ignored.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date <= self.end_date()
    }

    /// Short `HH:MM - HH:MM` label for calendar cells.
    pub fn time_label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(LABEL_TIME_FORMAT),
            self.end.format(LABEL_TIME_FORMAT)
        )
    }
}
