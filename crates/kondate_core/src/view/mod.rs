//! Host-agnostic view layer.
//!
//! # Responsibility
//! - Model the page as a pure `(state, event) -> (state, view)` step.
//! - Produce clipboard snippets with safe payload embedding.
//!
//! # Invariants
//! - Hosts never touch memos directly; every change goes through an event.

pub mod clipboard;
pub mod page;
pub mod session;
