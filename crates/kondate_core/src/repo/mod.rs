//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the day-keyed memo storage contract.
//! - Isolate map/storage details from service orchestration.
//!
//! # Invariants
//! - Repositories store text exactly as given; normalization is a service
//!   concern.
//! - Entries are never deleted once written.

pub mod memo_repo;
