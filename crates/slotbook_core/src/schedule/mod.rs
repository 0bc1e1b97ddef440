//! Reservation set maintenance and admission checks.
//!
//! # Responsibility
//! - Own the ordered `ScheduleSet` value type.
//! - Decide whether a new reservation may join a set.
//! - Hand out interval ids.
//!
//! # Invariants
//! - Nothing in this module mutates a set in place.

pub mod conflict;
pub mod ids;
pub mod schedule_set;
