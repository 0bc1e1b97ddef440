//! Domain model for owners, reservation drafts and admitted intervals.
//!
//! # Responsibility
//! - Define canonical data structures shared by conflict checking, calendar
//!   projection and the UI bridge.
//! - Turn raw form strings into typed instants exactly once.
//!
//! # Invariants
//! - Every admitted interval carries a unique `IntervalId`.
//! - An `Interval` always satisfies `end > start`.
//! - Owners are a fixed roster supplied by configuration, never created by core.

pub mod draft;
pub mod interval;
pub mod owner;

/// Calendar date combined with a time of day. No timezone is attached.
pub type Instant = chrono::NaiveDateTime;
