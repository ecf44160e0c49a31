//! Runtime configuration resolved from the environment.
//!
//! | variable               | default                 |
//! |------------------------|-------------------------|
//! | `EVENTLIST_VISITOR_DB` | `./visitors.db`         |
//! | `EVENTLIST_LOG_LEVEL`  | `default_log_level()`   |
//! | `EVENTLIST_LOG_DIR`    | unset (no file logging) |
//!
//! Blank values are treated as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const VISITOR_DB_ENV: &str = "EVENTLIST_VISITOR_DB";
pub const LOG_LEVEL_ENV: &str = "EVENTLIST_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "EVENTLIST_LOG_DIR";
pub const DEFAULT_VISITOR_DB: &str = "./visitors.db";

/// Settings needed to start the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub visitor_db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            visitor_db_path: PathBuf::from(DEFAULT_VISITOR_DB),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };
        let defaults = Self::default();

        Self {
            visitor_db_path: value(VISITOR_DB_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.visitor_db_path),
            log_level: value(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: value(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
