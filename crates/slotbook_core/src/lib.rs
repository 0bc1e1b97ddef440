//! Core domain logic for SlotBook reservations.
//! This crate is the single source of truth for admission and calendar rules.

pub mod calendar;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod service;

pub use calendar::grid::{MonthGrid, WEEKDAY_LABELS};
pub use calendar::month::{MonthKey, YearMonth};
pub use calendar::projector::{occupants_of, occupants_on, project_month, CalendarCell};
pub use calendar::CalendarError;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::draft::{Candidate, DraftError, DraftField, ScheduleDraft};
pub use model::interval::{Interval, IntervalError, IntervalId};
pub use model::owner::{Owner, OwnerDirectory, OwnerDirectoryError};
pub use model::Instant;
pub use schedule::conflict::{evaluate, AdmissionError};
pub use schedule::ids::{Clock, ClockIds, IdSource, SequentialIds, SystemClock};
pub use schedule::schedule_set::{ScheduleSet, ScheduleSetError};
pub use service::schedule_service::{
    Admitted, DayEntry, MonthCell, MonthView, ScheduleError, ScheduleRow, ScheduleService,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
