use rusqlite::Connection;

use crate::error::DuesResult;

/// Initialize the database schema. The roster lives in a single key-value
/// slot, so one table is all that is needed.
pub fn initialize(conn: &Connection) -> DuesResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv_slots (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
