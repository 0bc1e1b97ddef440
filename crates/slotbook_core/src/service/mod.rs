//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, conflict and calendar calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from admission details.

pub mod schedule_service;
