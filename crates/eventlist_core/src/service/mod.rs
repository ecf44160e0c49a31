//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repositories into the operations the presentation layer calls.
//! - Own failure policy (swallow vs. propagate) so callers do not have to.

pub mod visit_service;
