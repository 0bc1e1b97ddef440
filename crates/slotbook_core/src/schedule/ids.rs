//! Interval id sources.
//!
//! # Invariants
//! - Every source hands out strictly increasing ids.
//! - `ClockIds` never repeats an id even when the clock stalls or goes back.
//! - A source that cannot go past its last id returns `None` instead of
//!   wrapping around.

use crate::model::interval::IntervalId;

/// Supplies ids for newly admitted intervals.
pub trait IdSource {
    /// Next id, or `None` once `IntervalId::MAX` has been handed out.
    fn next_id(&mut self) -> Option<IntervalId>;
}

/// Deterministic counter starting at 1.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: IntervalId,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues after `last`, e.g. the largest id of an existing set.
    pub fn resume_after(last: Option<IntervalId>) -> Self {
        Self {
            last: last.unwrap_or(0),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> Option<IntervalId> {
        self.last = self.last.checked_add(1)?;
        Some(self.last)
    }
}

/// Millisecond wall clock.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// `chrono::Utc` backed clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Ids derived from the current epoch milliseconds.
///
/// Falls back to `last + 1` when the clock has not moved past the previous id.
#[derive(Debug, Clone, Default)]
pub struct ClockIds<C: Clock = SystemClock> {
    clock: C,
    last: Option<IntervalId>,
}

impl ClockIds<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues after `last` using the system clock.
    pub fn resume_after(last: Option<IntervalId>) -> Self {
        Self::with_clock(SystemClock, last)
    }
}

impl<C: Clock> ClockIds<C> {
    pub fn with_clock(clock: C, last: Option<IntervalId>) -> Self {
        Self { clock, last }
    }
}

impl<C: Clock> IdSource for ClockIds<C> {
    fn next_id(&mut self) -> Option<IntervalId> {
        let now = self.clock.now_millis();
        let id = match self.last {
            Some(last) if now <= last => last.checked_add(1)?,
            _ => now,
        };
        self.last = Some(id);
        Some(id)
    }
}
