//! Domain records for the event listing.
//!
//! # Responsibility
//! - Define the event and attendee shapes shared by the registry and any
//!   serialization layer built on top.
//!
//! # Invariants
//! - Event ids are assigned by the registry, never by callers.
//! - Event dates carry an explicit zone, never the host-local one.
//! - Serialized field names are a stable external contract.

pub mod event;
pub mod visitor;
