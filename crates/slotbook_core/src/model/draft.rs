//! Raw reservation form input and its parsed candidate form.
//!
//! # Responsibility
//! - Hold the five string fields exactly as the form produced them.
//! - Detect missing fields and parse dates/times into `Instant`s.
//!
//! # Invariants
//! - A field is missing when it is empty or whitespace-only.
//! - Missing-field detection runs before any parsing.
//! - Parsing never touches a `ScheduleSet`.

use crate::model::interval::Interval;
use crate::model::Instant;
use chrono::{NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}(:[0-9]{2})?$").expect("valid time regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_SECONDS: &str = "%H:%M:%S";

/// One of the five required form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Owner,
    StartDate,
    StartTime,
    EndDate,
    EndTime,
}

impl DraftField {
    /// Stable field key, matching serialized draft field names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::StartDate => "start_date",
            Self::StartTime => "start_time",
            Self::EndDate => "end_date",
            Self::EndTime => "end_time",
        }
    }
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input validation errors for a reservation draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Required fields are blank, listed in form order.
    MissingFields(Vec<DraftField>),
    /// Field value does not match `YYYY-MM-DD` / `HH:MM[:SS]`.
    Malformed { field: DraftField, value: String },
    /// Owner name is not on the configured roster.
    UnknownOwner(String),
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                let names = fields
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "please fill in all fields (missing: {names})")
            }
            Self::Malformed { field, value } => {
                write!(f, "invalid value `{value}` for field `{field}`")
            }
            Self::UnknownOwner(name) => write!(f, "unknown owner `{name}`"),
        }
    }
}

impl Error for DraftError {}

/// Reservation form input with five raw string fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDraft {
    pub owner: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub start_time: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub end_time: String,
}

impl ScheduleDraft {
    pub fn new(
        owner: impl Into<String>,
        start_date: impl Into<String>,
        start_time: impl Into<String>,
        end_date: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            start_date: start_date.into(),
            start_time: start_time.into(),
            end_date: end_date.into(),
            end_time: end_time.into(),
        }
    }

    /// Returns every blank field in form order.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        [
            (DraftField::Owner, &self.owner),
            (DraftField::StartDate, &self.start_date),
            (DraftField::StartTime, &self.start_time),
            (DraftField::EndDate, &self.end_date),
            (DraftField::EndTime, &self.end_time),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Parses the draft into a candidate.
    ///
    /// Does not check `end > start`; that belongs to admission.
    ///
    /// # Errors
    /// - `MissingFields` when any field is blank.
    /// - `Malformed` for the first field that fails to parse.
    pub fn parse(&self) -> Result<Candidate, DraftError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DraftError::MissingFields(missing));
        }

        let start = combine(
            parse_date(DraftField::StartDate, &self.start_date)?,
            parse_time(DraftField::StartTime, &self.start_time)?,
        );
        let end = combine(
            parse_date(DraftField::EndDate, &self.end_date)?,
            parse_time(DraftField::EndTime, &self.end_time)?,
        );

        Ok(Candidate {
            owner: self.owner.trim().to_string(),
            start,
            end,
        })
    }
}

impl From<&Interval> for ScheduleDraft {
    fn from(interval: &Interval) -> Self {
        Self {
            owner: interval.owner.clone(),
            start_date: interval.start.date().format(DATE_FORMAT).to_string(),
            start_time: format_time(interval.start.time()),
            end_date: interval.end.date().format(DATE_FORMAT).to_string(),
            end_time: format_time(interval.end.time()),
        }
    }
}

/// Parsed reservation request that has not been admitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub owner: String,
    pub start: Instant,
    pub end: Instant,
}

impl Candidate {
    pub fn new(owner: impl Into<String>, start: Instant, end: Instant) -> Self {
        Self {
            owner: owner.into(),
            start,
            end,
        }
    }

    /// Whether `end` is strictly after `start`.
    pub fn has_valid_window(&self) -> bool {
        self.end > self.start
    }
}

fn parse_date(field: DraftField, raw: &str) -> Result<NaiveDate, DraftError> {
    let value = raw.trim();
    if !DATE_RE.is_match(value) {
        return Err(malformed(field, value));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| malformed(field, value))
}

fn parse_time(field: DraftField, raw: &str) -> Result<NaiveTime, DraftError> {
    let value = raw.trim();
    let Some(captures) = TIME_RE.captures(value) else {
        return Err(malformed(field, value));
    };
    let format = if captures.get(1).is_some() {
        TIME_FORMAT_SECONDS
    } else {
        TIME_FORMAT
    };
    NaiveTime::parse_from_str(value, format).map_err(|_| malformed(field, value))
}

fn combine(date: NaiveDate, time: NaiveTime) -> Instant {
    date.and_time(time)
}

fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format(TIME_FORMAT).to_string()
    } else {
        time.format(TIME_FORMAT_SECONDS).to_string()
    }
}

fn malformed(field: DraftField, value: &str) -> DraftError {
    DraftError::Malformed {
        field,
        value: value.to_string(),
    }
}
