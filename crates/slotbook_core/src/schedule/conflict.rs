//! Admission checks for new reservations.
//!
//! # Responsibility
//! - Validate drafts (missing fields, parse, end-after-start).
//! - Detect same-day conflicts against an existing `ScheduleSet`.
//!
//! # Invariants
//! - Pure functions of their inputs; the set is only read.
//! - Missing fields are reported before order or conflict checks run.
//! - "Same day" compares boundary dates only: candidate start date against
//!   existing end date, or candidate end date against existing start date.
//!   Multi-day spans that share no boundary date never conflict.
//! - The scan stops at the first conflicting interval in set order. It does
//!   not look for the latest-ending conflict.

use crate::model::draft::{Candidate, DraftError, ScheduleDraft};
use crate::model::interval::{Interval, IntervalError, IntervalId};
use crate::model::Instant;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EARLIEST_ALLOWED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Reasons a reservation is not admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    /// Required input is missing, malformed or names an unknown owner.
    Validation(DraftError),
    /// `end` is not strictly after `start`.
    Order { start: Instant, end: Instant },
    /// Same-day overlap with an existing interval.
    Conflict {
        /// End of the first conflicting interval found.
        earliest_allowed: Instant,
        conflicting_id: IntervalId,
    },
}

impl Display for AdmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Order { .. } => write!(f, "end time must be after start time"),
            Self::Conflict {
                earliest_allowed, ..
            } => write!(
                f,
                "please select a time after {}",
                earliest_allowed.format(EARLIEST_ALLOWED_FORMAT)
            ),
        }
    }
}

impl Error for AdmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DraftError> for AdmissionError {
    fn from(value: DraftError) -> Self {
        Self::Validation(value)
    }
}

impl From<IntervalError> for AdmissionError {
    fn from(value: IntervalError) -> Self {
        match value {
            IntervalError::InvalidWindow { start, end } => Self::Order { start, end },
        }
    }
}

impl AdmissionError {
    /// Stable reason code for logs and UI envelopes.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Order { .. } => "order",
            Self::Conflict { .. } => "conflict",
        }
    }

    /// Earliest start the caller may retry with, for conflict rejections.
    pub fn earliest_allowed(&self) -> Option<Instant> {
        match self {
            Self::Conflict {
                earliest_allowed, ..
            } => Some(*earliest_allowed),
            _ => None,
        }
    }
}

/// Runs the full admission pipeline for raw form input.
///
/// Returns the parsed candidate when it may be admitted.
pub fn evaluate<'a, I>(existing: I, draft: &ScheduleDraft) -> Result<Candidate, AdmissionError>
where
    I: IntoIterator<Item = &'a Interval>,
{
    let candidate = draft.parse()?;
    check(existing, &candidate)?;
    Ok(candidate)
}

/// Order check and conflict scan for an already parsed candidate.
pub fn check<'a, I>(existing: I, candidate: &Candidate) -> Result<(), AdmissionError>
where
    I: IntoIterator<Item = &'a Interval>,
{
    if !candidate.has_valid_window() {
        return Err(AdmissionError::Order {
            start: candidate.start,
            end: candidate.end,
        });
    }

    match first_conflict(existing, candidate) {
        Some(conflict) => Err(AdmissionError::Conflict {
            earliest_allowed: conflict.end,
            conflicting_id: conflict.id,
        }),
        None => Ok(()),
    }
}

/// Returns the first interval, in iteration order, that blocks `candidate`.
pub fn first_conflict<'a, I>(existing: I, candidate: &Candidate) -> Option<&'a Interval>
where
    I: IntoIterator<Item = &'a Interval>,
{
    existing
        .into_iter()
        .find(|interval| shares_boundary_day(candidate, interval) && candidate.start < interval.end)
}

/// Same-day heuristic over boundary dates.
pub fn shares_boundary_day(candidate: &Candidate, existing: &Interval) -> bool {
    candidate.start.date() == existing.end_date() || candidate.end.date() == existing.start_date()
}

#[cfg(test)]
mod tests {
    use super::{check, first_conflict, shares_boundary_day, AdmissionError};
    use crate::model::draft::Candidate;
    use crate::model::interval::Interval;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid instant")
    }

    #[test]
    fn boundary_heuristic_ignores_spans_without_shared_boundary_date() {
        let existing = Interval::from_parts(1, "John Smith", at(1, 9), at(10, 9)).unwrap();
        let inside = Candidate::new("Jane Doe", at(4, 9), at(5, 9));
        assert!(!shares_boundary_day(&inside, &existing));
        assert_eq!(check([&existing], &inside), Ok(()));
    }

    #[test]
    fn candidate_ending_on_existing_start_date_is_same_day() {
        let existing = Interval::from_parts(1, "John Smith", at(5, 14), at(5, 15)).unwrap();
        let candidate = Candidate::new("Jane Doe", at(4, 9), at(5, 8));
        assert!(shares_boundary_day(&candidate, &existing));
        assert_eq!(
            first_conflict([&existing], &candidate).map(|interval| interval.id),
            Some(1)
        );
    }

    #[test]
    fn order_is_checked_before_conflicts() {
        let existing = Interval::from_parts(1, "John Smith", at(1, 9), at(1, 10)).unwrap();
        let reversed = Candidate::new("Jane Doe", at(1, 9), at(1, 8));
        assert!(matches!(
            check([&existing], &reversed),
            Err(AdmissionError::Order { .. })
        ));
    }

    #[test]
    fn conflict_message_names_earliest_allowed_instant() {
        let err = AdmissionError::Conflict {
            earliest_allowed: at(1, 10),
            conflicting_id: 1,
        };
        assert_eq!(err.to_string(), "please select a time after 2024-03-01 10:00");
        assert_eq!(err.earliest_allowed(), Some(at(1, 10)));
    }
}
