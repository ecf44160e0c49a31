//! In-memory event registry.
//!
//! # Responsibility
//! - Own the authoritative event collection and every attendee roster.
//! - Assign event ids and append registrations under one lock.
//!
//! # Invariants
//! - One mutex guards the whole collection, rosters included.
//! - Ids only grow: `max(existing, -1) + 1`. Events are never removed.
//! - Callers only ever receive copies of stored events.

pub mod event_registry;
pub mod seed;

pub use event_registry::{EventRegistry, RegistryError, RegistryResult};
pub use seed::{default_events, SeedError};
