//! SQLite storage bootstrap for the visit counter.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the visitor table.
//! - Apply schema migrations in deterministic order at startup.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Counter reads/writes only go through connections whose database has
//!   already been migrated by `open_db`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{connect, open_db};

pub type DbResult<T> = Result<T, DbError>;

/// Visitor store open/migrate failures.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The counter file was removed after startup created it.
    MissingDatabase(PathBuf),
    /// The file was migrated by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "visitor store sqlite error: {err}"),
            Self::MissingDatabase(path) => {
                write!(f, "visitor database `{}` does not exist", path.display())
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "visitor database schema v{db_version} is newer than this build (v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingDatabase(_) | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
