use eventlist_core::db::migrations::{latest_version, schema_version};
use eventlist_core::db::{connect, open_db, DbError};
use rusqlite::Connection;

#[test]
fn open_db_creates_visitors_table() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("visitors.db")).unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(
        column_names(&conn, "visitors"),
        vec!["domain".to_string(), "count".to_string()]
    );
}

#[test]
fn reopening_existing_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visitors.db");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO visitors (domain, count) VALUES ('yale.edu', 3);",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    let count: i64 = second
        .query_row(
            "SELECT count FROM visitors WHERE domain = 'yale.edu';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn table_created_by_older_build_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visitors.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE visitors (domain TEXT PRIMARY KEY, count INTEGER);
             INSERT INTO visitors (domain, count) VALUES ('legacy.com', 7);",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let count: i64 = conn
        .query_row(
            "SELECT count FROM visitors WHERE domain = 'legacy.com';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 7);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn connect_does_not_create_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");

    match connect(&path).unwrap_err() {
        DbError::MissingDatabase(missing) => assert_eq!(missing, path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!path.exists());
}

fn column_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}
