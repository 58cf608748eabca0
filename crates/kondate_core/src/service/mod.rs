//! Core use-case services.
//!
//! # Responsibility
//! - Normalize user text and orchestrate memo repository calls.
//! - Derive weekly summaries for the view layer.
//!
//! # Invariants
//! - Services are total: no operation here returns an error.
//! - Service layer stays free of rendering concerns.

pub mod memo_service;
pub mod text;
pub mod weekly_aggregator;
