//! Persistence contracts for durable state.
//!
//! # Responsibility
//! - Keep SQL details behind use-case oriented traits.
//!
//! # Invariants
//! - Repository errors carry the underlying storage cause as `source()`.

pub mod visitor_repo;
