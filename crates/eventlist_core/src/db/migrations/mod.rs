//! Versioned schema steps for the visitor database.
//!
//! # Invariants
//! - Versions are strictly increasing.
//! - Every pending step plus the `user_version` bump commit in one transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// (version, sql) pairs, oldest first.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_visitors.sql"))];

/// Returns the newest schema version this build can apply.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to `latest_version()`.
///
/// Rejects databases written by a newer build instead of guessing.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let to = latest_version();

    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }
    if from == to {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in SCHEMA_STEPS.iter().filter(|(version, _)| *version > from) {
        tx.execute_batch(sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {version};"))?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
    Ok(())
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
