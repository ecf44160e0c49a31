//! Registration core of the event listing service.
//! Owns events, attendee rosters, confirmation codes and visit counts.

pub mod config;
pub mod confirmation;
pub mod db;
pub mod logging;
pub mod model;
pub mod registry;
pub mod repo;
pub mod service;
pub mod startup;

pub use config::CoreConfig;
pub use confirmation::{generate_code, CONFIRMATION_CODE_LEN};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{Attendee, Event, EventDate, EventId, EventList, NewEvent};
pub use model::visitor::VisitorCount;
pub use registry::{EventRegistry, RegistryError, RegistryResult, SeedError};
pub use repo::visitor_repo::{RepoError, RepoResult, SqliteVisitorRepository, VisitorRepository};
pub use service::visit_service::VisitService;
pub use startup::{EventListCore, StartupError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
