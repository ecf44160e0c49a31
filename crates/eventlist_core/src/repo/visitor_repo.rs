//! Visitor counter repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Increment per-domain visit counts with SQLite's native upsert.
//! - List counts ranked by popularity.
//!
//! # Invariants
//! - `increment` is a single `INSERT ... ON CONFLICT` statement; there is no
//!   read-modify-write window in Rust code.
//! - Ranking is `count DESC, domain ASC`, so ties order deterministically.
//! - Read paths reject rows with a missing or non-positive count.

use crate::db::DbError;
use crate::model::visitor::VisitorCount;
use rusqlite::{Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage failure for visitor counter operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted visitor data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the per-referrer visit counter.
pub trait VisitorRepository {
    /// Inserts `domain` with count 1, or adds 1 to its existing count.
    fn increment(&self, domain: &str) -> RepoResult<()>;
    /// Returns every known domain ordered by count, highest first.
    fn list_ranked(&self) -> RepoResult<Vec<VisitorCount>>;
}

/// SQLite-backed visitor repository over a borrowed connection.
pub struct SqliteVisitorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVisitorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl VisitorRepository for SqliteVisitorRepository<'_> {
    fn increment(&self, domain: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO visitors (domain, count)
             VALUES (?1, 1)
             ON CONFLICT(domain) DO UPDATE SET count = count + 1;",
            [domain],
        )?;
        Ok(())
    }

    fn list_ranked(&self) -> RepoResult<Vec<VisitorCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT domain, count
             FROM visitors
             ORDER BY count DESC, domain ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut ranked = Vec::new();

        while let Some(row) = rows.next()? {
            ranked.push(parse_visitor_row(row)?);
        }

        Ok(ranked)
    }
}

fn parse_visitor_row(row: &Row<'_>) -> RepoResult<VisitorCount> {
    let domain: String = row.get("domain")?;
    // Tables adopted from older builds allow NULL counts.
    let Some(count) = row.get::<_, Option<i64>>("count")? else {
        return Err(RepoError::InvalidData(format!(
            "missing count for domain `{domain}` in visitors.count"
        )));
    };
    if count < 1 {
        return Err(RepoError::InvalidData(format!(
            "non-positive count `{count}` for domain `{domain}` in visitors.count"
        )));
    }
    Ok(VisitorCount { domain, count })
}

#[cfg(test)]
mod tests {
    use super::{RepoError, SqliteVisitorRepository, VisitorRepository};
    use crate::db::open_db;
    use rusqlite::Connection;

    #[test]
    fn first_increment_inserts_count_one() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(dir.path().join("visitors.db")).unwrap();
        let repo = SqliteVisitorRepository::new(&conn);

        repo.increment("news.ycombinator.com").unwrap();

        let ranked = repo.list_ranked().unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].domain, "news.ycombinator.com");
        assert_eq!(ranked[0].count, 1);
    }

    #[test]
    fn ties_are_ordered_by_domain() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(dir.path().join("visitors.db")).unwrap();
        let repo = SqliteVisitorRepository::new(&conn);

        repo.increment("b.com").unwrap();
        repo.increment("a.com").unwrap();
        repo.increment("c.com").unwrap();
        repo.increment("c.com").unwrap();

        let domains = repo
            .list_ranked()
            .unwrap()
            .into_iter()
            .map(|visitor| visitor.domain)
            .collect::<Vec<_>>();
        assert_eq!(domains, vec!["c.com", "a.com", "b.com"]);
    }

    #[test]
    fn corrupted_count_is_reported_as_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(dir.path().join("visitors.db")).unwrap();
        conn.execute(
            "INSERT INTO visitors (domain, count) VALUES ('bad.com', 0);",
            [],
        )
        .unwrap();

        let err = SqliteVisitorRepository::new(&conn)
            .list_ranked()
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn null_count_in_adopted_table_is_reported_as_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visitors.db");
        let legacy = Connection::open(&path).unwrap();
        legacy
            .execute_batch(
                "CREATE TABLE visitors (domain TEXT PRIMARY KEY, count INTEGER);
                 INSERT INTO visitors (domain, count) VALUES ('old.com', NULL);",
            )
            .unwrap();
        drop(legacy);

        let conn = open_db(&path).unwrap();
        let err = SqliteVisitorRepository::new(&conn)
            .list_ranked()
            .unwrap_err();
        match err {
            RepoError::InvalidData(message) => assert!(message.contains("old.com")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
