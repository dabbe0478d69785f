/// SQL schema for the notes database
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    text TEXT NOT NULL,
    datetime TEXT NOT NULL
);

PRAGMA user_version = 1;
"#;

pub const CURRENT_VERSION: i32 = 1;

/// Get current schema version from database
pub fn get_schema_version(conn: &rusqlite::Connection) -> Result<i32, rusqlite::Error> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Create the notes table on a fresh database.
///
/// Databases already at the current version are left untouched; any other
/// version is refused rather than guessed at.
pub fn ensure_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        tracing::info!("Initializing notes database schema");
        conn.execute_batch(SCHEMA_V1)?;
        return Ok(());
    }

    if version == CURRENT_VERSION {
        Ok(())
    } else {
        Err(rusqlite::Error::InvalidQuery)
    }
}
