//! Ordered reservation collection.
//!
//! # Responsibility
//! - Keep admitted intervals ordered by `start` descending.
//! - Model mutation as replace-with-new-sequence.
//!
//! # Invariants
//! - Order is `start DESC`; ties keep insertion order.
//! - Ids are unique within a set; building a set from duplicates fails.
//! - Mutating helpers take `&self` and return a new set; the receiver is
//!   never modified.

use crate::model::interval::{Interval, IntervalId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Set construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSetError {
    DuplicateId(IntervalId),
}

impl Display for ScheduleSetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate schedule id: {id}"),
        }
    }
}

impl Error for ScheduleSetError {}

/// Intervals ordered by start instant, latest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Interval>", into = "Vec<Interval>")]
pub struct ScheduleSet {
    intervals: Vec<Interval>,
}

impl ScheduleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from intervals in any order.
    ///
    /// # Errors
    /// - `DuplicateId` for the first id that appears twice.
    pub fn from_intervals(mut intervals: Vec<Interval>) -> Result<Self, ScheduleSetError> {
        let mut seen = BTreeSet::new();
        for interval in &intervals {
            if !seen.insert(interval.id) {
                return Err(ScheduleSetError::DuplicateId(interval.id));
            }
        }
        sort_latest_first(&mut intervals);
        Ok(Self { intervals })
    }

    /// Returns a new set with `interval` added at its ordered position.
    ///
    /// The caller supplies a fresh id; see `ScheduleService::add_schedule`.
    pub fn inserted(&self, interval: Interval) -> Self {
        let mut intervals = Vec::with_capacity(self.intervals.len() + 1);
        intervals.extend(self.intervals.iter().cloned());
        intervals.push(interval);
        sort_latest_first(&mut intervals);
        Self { intervals }
    }

    /// Returns a new set without the interval `id`, or `None` when no such
    /// interval exists. Remaining order is unchanged.
    pub fn removed(&self, id: IntervalId) -> Option<Self> {
        let position = self.intervals.iter().position(|interval| interval.id == id)?;
        let mut intervals = self.intervals.clone();
        intervals.remove(position);
        Some(Self { intervals })
    }

    pub fn get(&self, id: IntervalId) -> Option<&Interval> {
        self.intervals.iter().find(|interval| interval.id == id)
    }

    pub fn contains(&self, id: IntervalId) -> bool {
        self.get(id).is_some()
    }

    /// Largest id in the set, used to resume monotonic id sources.
    pub fn latest_id(&self) -> Option<IntervalId> {
        self.intervals.iter().map(|interval| interval.id).max()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl TryFrom<Vec<Interval>> for ScheduleSet {
    type Error = ScheduleSetError;

    fn try_from(value: Vec<Interval>) -> Result<Self, Self::Error> {
        Self::from_intervals(value)
    }
}

impl From<ScheduleSet> for Vec<Interval> {
    fn from(value: ScheduleSet) -> Self {
        value.intervals
    }
}

impl<'a> IntoIterator for &'a ScheduleSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

// Stable sort keeps earlier-admitted intervals first among equal starts.
fn sort_latest_first(intervals: &mut [Interval]) {
    intervals.sort_by(|a, b| b.start.cmp(&a.start));
}

#[cfg(test)]
mod tests {
    use super::{ScheduleSet, ScheduleSetError};
    use crate::model::interval::Interval;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid instant")
    }

    fn interval(id: u64, day: u32, hour: u32) -> Interval {
        Interval::from_parts(id, "John Smith", at(day, hour), at(day, hour + 1)).unwrap()
    }

    fn ids(set: &ScheduleSet) -> Vec<u64> {
        set.iter().map(|interval| interval.id).collect()
    }

    #[test]
    fn inserted_keeps_latest_start_first_and_leaves_receiver_untouched() {
        let empty = ScheduleSet::new();
        let one = empty.inserted(interval(1, 2, 9));
        let two = one.inserted(interval(2, 5, 9));
        let three = two.inserted(interval(3, 1, 9));

        assert!(empty.is_empty());
        assert_eq!(ids(&one), vec![1]);
        assert_eq!(ids(&three), vec![2, 1, 3]);
    }

    #[test]
    fn equal_starts_keep_insertion_order() {
        let set = ScheduleSet::new()
            .inserted(interval(1, 2, 9))
            .inserted(interval(2, 2, 9));
        assert_eq!(ids(&set), vec![1, 2]);
    }

    #[test]
    fn removed_returns_none_for_unknown_id() {
        let set = ScheduleSet::new().inserted(interval(1, 2, 9));
        assert!(set.removed(99).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn latest_id_ignores_order() {
        let set = ScheduleSet::from_intervals(vec![interval(7, 1, 9), interval(3, 9, 9)]).unwrap();
        assert_eq!(set.latest_id(), Some(7));
        assert_eq!(ScheduleSet::new().latest_id(), None);
    }

    #[test]
    fn from_intervals_rejects_duplicate_ids() {
        let err = ScheduleSet::from_intervals(vec![
            interval(5, 1, 9),
            interval(5, 2, 9),
            interval(6, 3, 9),
        ])
        .unwrap_err();
        assert_eq!(err, ScheduleSetError::DuplicateId(5));
    }
}
