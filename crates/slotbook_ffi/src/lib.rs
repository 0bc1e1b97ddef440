//! Flutter bridge for SlotBook core use-cases.

pub mod api;
