//! Reservation use-case service.
//!
//! # Responsibility
//! - Provide admit/delete entry points over caller-owned `ScheduleSet`s.
//! - Shape list and calendar views for UI callers.
//!
//! # Invariants
//! - The caller's set is never modified; every change returns a new set.
//! - Owners must be on the configured roster before a conflict scan runs.
//! - A fresh id that is exhausted or already present rejects the draft
//!   instead of producing a set with duplicate ids.
//! - Logs carry ids, counts and reason codes only, never owner names.

use crate::calendar::grid::WEEKDAY_LABELS;
use crate::calendar::month::YearMonth;
use crate::calendar::projector::{project_month, CalendarCell};
use crate::calendar::CalendarError;
use crate::model::draft::{DraftError, ScheduleDraft};
use crate::model::interval::{Interval, IntervalId};
use crate::model::owner::OwnerDirectory;
use crate::schedule::conflict::{self, AdmissionError};
use crate::schedule::ids::IdSource;
use crate::schedule::schedule_set::ScheduleSet;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ROW_INSTANT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Service error for reservation use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Draft was not admitted.
    Admission(AdmissionError),
    /// No interval with this id.
    NotFound(IntervalId),
    /// Requested month/day does not exist.
    Calendar(CalendarError),
    /// Id source has no id left to hand out.
    IdsExhausted,
    /// Id source returned an id the set already holds.
    DuplicateId(IntervalId),
}

impl ScheduleError {
    /// Stable reason code for callers and logs.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Admission(err) => err.reason_code(),
            Self::NotFound(_) => "not_found",
            Self::Calendar(_) => "calendar",
            Self::IdsExhausted => "ids_exhausted",
            Self::DuplicateId(_) => "duplicate_id",
        }
    }
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admission(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "schedule not found: {id}"),
            Self::Calendar(err) => write!(f, "{err}"),
            Self::IdsExhausted => write!(f, "no schedule ids left"),
            Self::DuplicateId(id) => write!(f, "schedule id already in use: {id}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Admission(err) => Some(err),
            Self::NotFound(_) | Self::IdsExhausted | Self::DuplicateId(_) => None,
            Self::Calendar(err) => Some(err),
        }
    }
}

impl From<AdmissionError> for ScheduleError {
    fn from(value: AdmissionError) -> Self {
        Self::Admission(value)
    }
}

impl From<DraftError> for ScheduleError {
    fn from(value: DraftError) -> Self {
        Self::Admission(AdmissionError::Validation(value))
    }
}

impl From<CalendarError> for ScheduleError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

/// Result of a successful admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admitted {
    /// Id assigned to the new interval.
    pub id: IntervalId,
    /// Replacement set containing the new interval.
    pub schedules: ScheduleSet,
}

/// List-view row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub id: IntervalId,
    pub owner: String,
    /// `None` when the owner is no longer on the roster.
    pub color: Option<String>,
    /// `YYYY-MM-DD HH:MM`
    pub start_label: String,
    /// `YYYY-MM-DD HH:MM`
    pub end_label: String,
}

/// One reservation chip inside a calendar day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub id: IntervalId,
    pub owner: String,
    pub color: Option<String>,
    /// `HH:MM - HH:MM`
    pub time_label: String,
}

/// Calendar-view cell with render-ready entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthCell {
    Blank,
    Day { day: u32, entries: Vec<DayEntry> },
}

/// Render-ready calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub month: YearMonth,
    /// Header such as `March 2024`.
    pub title: String,
    pub weekday_labels: [&'static str; 7],
    pub cells: Vec<MonthCell>,
}

/// Reservation service over caller-owned schedule sets.
pub struct ScheduleService<I: IdSource> {
    directory: OwnerDirectory,
    ids: I,
}

impl<I: IdSource> ScheduleService<I> {
    /// Creates a service with a roster and id source.
    pub fn new(directory: OwnerDirectory, ids: I) -> Self {
        Self { directory, ids }
    }

    pub fn directory(&self) -> &OwnerDirectory {
        &self.directory
    }

    /// Validates, checks and admits a draft.
    ///
    /// # Contract
    /// - Checks run in order: missing fields, parse, roster membership,
    ///   end-after-start, same-day conflict.
    /// - An id is consumed only when the draft passes every check.
    /// - Fails with `IdsExhausted` or `DuplicateId` when the id source
    ///   cannot supply an id that is fresh for `schedules`.
    /// - Returns the replacement set; `schedules` itself is unchanged.
    pub fn add_schedule(
        &mut self,
        schedules: &ScheduleSet,
        draft: &ScheduleDraft,
    ) -> Result<Admitted, ScheduleError> {
        let result = self.admit(schedules, draft);
        match &result {
            Ok(admitted) => info!(
                "event=schedule_admit module=schedule status=ok id={} total={}",
                admitted.id,
                admitted.schedules.len()
            ),
            Err(err) => debug!(
                "event=schedule_admit module=schedule status=rejected reason={} total={}",
                err.reason_code(),
                schedules.len()
            ),
        }
        result
    }

    fn admit(
        &mut self,
        schedules: &ScheduleSet,
        draft: &ScheduleDraft,
    ) -> Result<Admitted, ScheduleError> {
        let candidate = draft.parse()?;
        if !self.directory.contains(&candidate.owner) {
            return Err(DraftError::UnknownOwner(candidate.owner).into());
        }
        conflict::check(schedules, &candidate)?;

        let id = self.ids.next_id().ok_or(ScheduleError::IdsExhausted)?;
        if schedules.contains(id) {
            return Err(ScheduleError::DuplicateId(id));
        }
        let interval = Interval::new(id, candidate).map_err(AdmissionError::from)?;
        Ok(Admitted {
            id,
            schedules: schedules.inserted(interval),
        })
    }

    /// Removes one interval by id and returns the replacement set.
    pub fn delete_schedule(
        &self,
        schedules: &ScheduleSet,
        id: IntervalId,
    ) -> Result<ScheduleSet, ScheduleError> {
        match schedules.removed(id) {
            Some(remaining) => {
                info!(
                    "event=schedule_delete module=schedule status=ok id={} total={}",
                    id,
                    remaining.len()
                );
                Ok(remaining)
            }
            None => {
                warn!(
                    "event=schedule_delete module=schedule status=not_found id={}",
                    id
                );
                Err(ScheduleError::NotFound(id))
            }
        }
    }

    /// Rows for the list view, in set order.
    pub fn list_rows(&self, schedules: &ScheduleSet) -> Vec<ScheduleRow> {
        schedules
            .iter()
            .map(|interval| ScheduleRow {
                id: interval.id,
                owner: interval.owner.clone(),
                color: self.color_of(interval),
                start_label: interval.start.format(ROW_INSTANT_FORMAT).to_string(),
                end_label: interval.end.format(ROW_INSTANT_FORMAT).to_string(),
            })
            .collect()
    }

    /// Calendar view for one month.
    pub fn month_view(&self, schedules: &ScheduleSet, month: YearMonth) -> MonthView {
        let cells = project_month(schedules, month)
            .into_iter()
            .map(|cell| match cell {
                CalendarCell::Blank => MonthCell::Blank,
                CalendarCell::Day { day, occupants, .. } => MonthCell::Day {
                    day,
                    entries: occupants
                        .into_iter()
                        .map(|interval| self.day_entry(interval))
                        .collect(),
                },
            })
            .collect();

        MonthView {
            month,
            title: month.title(),
            weekday_labels: WEEKDAY_LABELS,
            cells,
        }
    }

    /// Calendar view addressed by raw year and month numbers.
    pub fn month_view_at(
        &self,
        schedules: &ScheduleSet,
        year: i32,
        month: u32,
    ) -> Result<MonthView, ScheduleError> {
        let month = YearMonth::new(year, month)?;
        Ok(self.month_view(schedules, month))
    }

    fn day_entry(&self, interval: &Interval) -> DayEntry {
        DayEntry {
            id: interval.id,
            owner: interval.owner.clone(),
            color: self.color_of(interval),
            time_label: interval.time_label(),
        }
    }

    fn color_of(&self, interval: &Interval) -> Option<String> {
        self.directory.color_of(&interval.owner).map(str::to_string)
    }
}
