//! Schema and connection pragmas for the items database.

use rusqlite::Connection;
use std::time::Duration;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Table definition, created on first run if absent.
const CREATE_ITEMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT    NOT NULL,
    description  TEXT,
    location     TEXT,
    date_found   TEXT    NOT NULL,
    contact_info TEXT,
    claimed      INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_items_date_found ON items (date_found DESC);
"#;

/// Apply pragmas to every connection handed out by the pool.
pub fn apply_pragmas(conn: &Connection) -> Result<(), rusqlite::Error> {
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    tracing::trace!(journal_mode = %mode, "Applied connection pragmas");
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

/// Create the items table and its index if they do not exist yet.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(CREATE_ITEMS_TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let conn = Connection::open(temp_dir.path().join("schema.db")).unwrap();
        apply_pragmas(&conn).unwrap();

        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'items'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_claimed_defaults_to_false() {
        let temp_dir = TempDir::new().unwrap();
        let conn = Connection::open(temp_dir.path().join("schema.db")).unwrap();
        initialize_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO items (name, date_found) VALUES ('Keys', '2024-02-01')",
            [],
        )
        .unwrap();
        let claimed: bool = conn
            .query_row("SELECT claimed FROM items", [], |row| row.get(0))
            .unwrap();
        assert!(!claimed);
    }
}
