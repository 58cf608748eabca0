//! Domain model for the weekly planner.
//!
//! # Responsibility
//! - Define the canonical date and window types used by every layer.
//! - Define the per-day memo record stored by the repository.
//!
//! # Invariants
//! - Dates are keyed by one canonical `YYYY-MM-DD` encoding.
//! - Windows are derived values and never stored.

pub mod calendar;
pub mod memo;
