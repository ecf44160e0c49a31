//! Visit counting use-cases.
//!
//! # Responsibility
//! - Record one referrer visit without ever failing the caller.
//! - Serve the ranked visitor listing, surfacing storage failures.
//!
//! # Invariants
//! - Each call uses its own SQLite connection; concurrent callers need no
//!   coordination and rely on SQLite's write locking plus the upsert.
//! - Write failures are logged at `error` and swallowed.

use crate::db::{connect, open_db, DbResult};
use crate::model::visitor::VisitorCount;
use crate::repo::visitor_repo::{RepoResult, SqliteVisitorRepository, VisitorRepository};
use log::{debug, error};
use std::path::{Path, PathBuf};

/// Handle to the durable per-referrer visit counter.
///
/// Cheap to clone; holds only the database location.
#[derive(Debug, Clone)]
pub struct VisitService {
    db_path: PathBuf,
}

impl VisitService {
    /// Creates or migrates the visitor database at `db_path`.
    ///
    /// Failure here means the counter table cannot exist, which callers must
    /// treat as fatal at startup.
    pub fn open(db_path: impl AsRef<Path>) -> DbResult<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        drop(open_db(&db_path)?);
        Ok(Self { db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Counts one visit from `domain`. Fire-and-forget.
    pub fn record_visit(&self, domain: &str) {
        match self.with_repo(|repo| repo.increment(domain)) {
            Ok(()) => debug!("event=visit_record module=visits status=ok domain={domain}"),
            Err(err) => error!(
                "event=visit_record module=visits status=error domain={domain} error={err}"
            ),
        }
    }

    /// Returns all domains ranked by visit count, highest first.
    pub fn ranked_visits(&self) -> RepoResult<Vec<VisitorCount>> {
        self.with_repo(|repo| repo.list_ranked())
    }

    fn with_repo<T>(
        &self,
        f: impl FnOnce(&SqliteVisitorRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = connect(&self.db_path)?;
        let repo = SqliteVisitorRepository::new(&conn);
        f(&repo)
    }
}
