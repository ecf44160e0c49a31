//! Core construction at process start.
//!
//! # Responsibility
//! - Build the seeded event registry and open the visitor store together.
//!
//! # Invariants
//! - Any failure here is fatal: the process must not serve traffic.

use crate::config::CoreConfig;
use crate::db::DbError;
use crate::registry::{EventRegistry, SeedError};
use crate::service::visit_service::VisitService;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unrecoverable startup failure.
#[derive(Debug)]
pub enum StartupError {
    Seed(SeedError),
    Db(DbError),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seed(err) => write!(f, "cannot build seed events: {err}"),
            Self::Db(err) => write!(f, "cannot open visitor database: {err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Seed(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<SeedError> for StartupError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

impl From<DbError> for StartupError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Everything the presentation layer calls into.
#[derive(Debug)]
pub struct EventListCore {
    pub events: EventRegistry,
    pub visits: VisitService,
}

impl EventListCore {
    /// Seeds the registry and opens (creating if needed) the visitor store.
    pub fn start(config: &CoreConfig) -> Result<Self, StartupError> {
        let result = EventRegistry::with_default_events()
            .map_err(StartupError::from)
            .and_then(|events| {
                let visits = VisitService::open(&config.visitor_db_path)?;
                Ok(Self { events, visits })
            });

        match &result {
            Ok(core) => info!(
                "event=core_start module=core status=ok events={} visitor_db={}",
                core.events.len(),
                config.visitor_db_path.display()
            ),
            Err(err) => error!("event=core_start module=core status=error error={err}"),
        }
        result
    }
}
