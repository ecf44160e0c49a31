//! Connection helpers for the visitor database file.
//!
//! # Responsibility
//! - Create/migrate the database once at startup (`open_db`).
//! - Hand out cheap per-call connections for counter operations (`connect`).
//!
//! # Invariants
//! - Every returned connection has a busy timeout, so concurrent writers wait
//!   on SQLite's lock instead of failing immediately.
//! - `connect` never creates a file; a missing database is an error.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if absent) the database file and applies pending
/// migrations.
///
/// # Side effects
/// - Switches the file to WAL journaling so readers do not block writers.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start path={}",
        path.display()
    );

    let result = Connection::open(path)
        .map_err(DbError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Opens an extra read-write connection to an existing, migrated database.
pub fn connect(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DbError::MissingDatabase(path.to_path_buf()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let journal_mode: String =
        conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    info!("event=db_open module=db status=configured journal_mode={journal_mode}");
    apply_migrations(conn)?;
    Ok(())
}
