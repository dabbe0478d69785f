use crate::error::{NoteError, NoteResult};
use crate::models::{NewNote, Note, NoteInput};
use crate::schema;
use crate::validate::prepare;
use rusqlite::{params, Connection, Result, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Open or create a notes database at the specified path
pub fn open_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    schema::ensure_schema(&conn)?;
    Ok(conn)
}

fn note_from_row(row: &Row) -> Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        datetime: row.get(3)?,
    })
}

/// Insert a note and return it with its assigned id
pub fn insert_note(conn: &Connection, note: &NewNote) -> Result<Note> {
    conn.query_row(
        "INSERT INTO notes (title, text, datetime) VALUES (?1, ?2, ?3)
         RETURNING id, title, text, datetime",
        params![note.title, note.text, note.datetime],
        note_from_row,
    )
}

/// Get every note in insertion order
pub fn select_notes(conn: &Connection) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare("SELECT id, title, text, datetime FROM notes ORDER BY id")?;
    let rows = stmt.query_map([], note_from_row)?;

    let mut notes = Vec::new();
    for note in rows {
        notes.push(note?);
    }

    Ok(notes)
}

/// Get a note by ID
pub fn select_note(conn: &Connection, id: i64) -> Result<Option<Note>> {
    let mut stmt = conn.prepare("SELECT id, title, text, datetime FROM notes WHERE id = ?1")?;

    match stmt.query_row(params![id], note_from_row) {
        Ok(n) => Ok(Some(n)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Overwrite all fields of a note, returning the row as written.
/// `None` means no row has that id.
pub fn update_note(conn: &Connection, id: i64, note: &NewNote) -> Result<Option<Note>> {
    let updated = conn.query_row(
        "UPDATE notes SET title = ?1, text = ?2, datetime = ?3 WHERE id = ?4
         RETURNING id, title, text, datetime",
        params![note.title, note.text, note.datetime, id],
        note_from_row,
    );

    match updated {
        Ok(n) => Ok(Some(n)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Delete a note, returning the number of rows removed
pub fn delete_note(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM notes WHERE id = ?1", params![id])
}

/// Where the repository finds its database
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Note storage with one connection per operation.
///
/// Every method opens the database, runs a single statement and drops the
/// connection before returning, whichever way the call ends.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    config: DbConfig,
}

impl NoteRepository {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    /// Validate, sanitize and insert a note
    pub fn create(&self, input: &NoteInput) -> NoteResult<Note> {
        let note = prepare(input).map_err(NoteError::Validation)?;

        self.run("create", |conn| insert_note(conn, &note))
    }

    /// All stored notes, oldest first
    pub fn read_all(&self) -> NoteResult<Vec<Note>> {
        self.run("read_all", select_notes)
    }

    /// Look up one note. Ids that are not integers match nothing.
    pub fn read_one(&self, id: &str) -> NoteResult<Note> {
        let Some(key) = row_key(id) else {
            return Err(NoteError::not_found(id));
        };

        self.run("read_one", |conn| select_note(conn, key))?
            .ok_or_else(|| NoteError::not_found(id))
    }

    /// Validate, sanitize and overwrite title, text and datetime of a note
    pub fn update(&self, id: &str, input: &NoteInput) -> NoteResult<Note> {
        let note = prepare(input).map_err(NoteError::Validation)?;

        let Some(key) = row_key(id) else {
            return Err(NoteError::not_found(id));
        };

        self.run("update", |conn| update_note(conn, key, &note))?
            .ok_or_else(|| NoteError::not_found(id))
    }

    /// Permanently remove a note
    pub fn delete(&self, id: &str) -> NoteResult<()> {
        let Some(key) = row_key(id) else {
            return Err(NoteError::not_found(id));
        };

        match self.run("delete", |conn| delete_note(conn, key))? {
            0 => Err(NoteError::not_found(id)),
            1 => Ok(()),
            n => {
                error!(id, rows = n, "delete removed more than one note");
                Err(NoteError::InvariantViolation(format!(
                    "delete of id {} removed {} rows",
                    id, n
                )))
            }
        }
    }

    /// Open the database once and report whether that worked
    pub fn ping(&self) -> NoteResult<()> {
        self.run("ping", |_| Ok(()))
    }

    fn run<T>(
        &self,
        operation: &str,
        query: impl FnOnce(&Connection) -> Result<T>,
    ) -> NoteResult<T> {
        debug!(operation, path = ?self.config.path, "running note query");

        let result = open_db(&self.config.path).and_then(|conn| query(&conn));

        result.map_err(|e| {
            error!(operation, error = %e, "note storage failure");
            NoteError::Storage(e)
        })
    }
}

fn row_key(id: &str) -> Option<i64> {
    id.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, NoteRepository) {
        let dir = TempDir::new().unwrap();
        let repo = NoteRepository::new(DbConfig::new(dir.path().join("test.db")));
        (dir, repo)
    }

    fn valid_note() -> NoteInput {
        NoteInput::new("A", "b", "2023-01-01T00:00:00Z")
    }

    #[test]
    fn test_create_and_read_one() {
        let (_dir, repo) = setup();

        let note = repo.create(&valid_note()).unwrap();

        assert!(note.id > 0);
        assert_eq!(note.title, "A");
        assert_eq!(note.text, "b");
        assert_eq!(note.datetime, "2023-01-01T00:00:00Z");

        let retrieved = repo.read_one(&note.id.to_string()).unwrap();

        assert_eq!(retrieved, note);
    }

    #[test]
    fn test_create_invalid_does_not_write() {
        let (_dir, repo) = setup();
        repo.create(&valid_note()).unwrap();

        let result = repo.create(&NoteInput::new("", "b", "2023-01-01T00:00:00Z"));

        match result {
            Err(NoteError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "title");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(repo.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_create_neutralizes_script() {
        let (_dir, repo) = setup();

        let note = repo
            .create(&NoteInput::new(
                "<script>alert(1)</script>",
                "t",
                "2023-01-01T00:00:00Z",
            ))
            .unwrap();

        assert!(!note.title.contains("<script>"));
        let stored = repo.read_one(&note.id.to_string()).unwrap();
        assert!(!stored.title.contains("<script>"));
        assert_eq!(stored.title, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn test_read_all_empty_store() {
        let (_dir, repo) = setup();

        assert!(repo.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_all_in_insertion_order() {
        let (_dir, repo) = setup();

        let first = repo.create(&NoteInput::new("first", "", "2023-01-02")).unwrap();
        let second = repo.create(&NoteInput::new("second", "", "2023-01-01")).unwrap();

        let notes = repo.read_all().unwrap();

        assert_eq!(notes, vec![first, second]);
    }

    #[test]
    fn test_read_one_unknown_ids() {
        let (_dir, repo) = setup();
        repo.create(&valid_note()).unwrap();

        for id in ["999999", "-1", "abc", "1; DROP TABLE notes", ""] {
            assert!(
                matches!(repo.read_one(id), Err(NoteError::NotFound(_))),
                "{} should not be found",
                id
            );
        }
        assert_eq!(repo.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_overwrites_all_fields() {
        let (_dir, repo) = setup();
        let note = repo.create(&valid_note()).unwrap();
        let id = note.id.to_string();

        let updated = repo
            .update(&id, &NoteInput::new("B", "<c>", "2024-02-02"))
            .unwrap();

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.title, "B");
        assert_eq!(updated.text, "&lt;c&gt;");
        assert_eq!(updated.datetime, "2024-02-02");
        assert_eq!(repo.read_one(&id).unwrap(), updated);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let (_dir, repo) = setup();

        let result = repo.update("999999", &valid_note());

        assert!(matches!(result, Err(NoteError::NotFound(_))));
    }

    #[test]
    fn test_update_invalid_does_not_write() {
        let (_dir, repo) = setup();
        let note = repo.create(&valid_note()).unwrap();
        let id = note.id.to_string();

        let result = repo.update(&id, &NoteInput::new("B", "c", "not a date"));

        assert!(matches!(result, Err(NoteError::Validation(_))));
        assert_eq!(repo.read_one(&id).unwrap(), note);
    }

    #[test]
    fn test_delete_then_delete_again() {
        let (_dir, repo) = setup();
        let note = repo.create(&valid_note()).unwrap();
        let id = note.id.to_string();

        repo.delete(&id).unwrap();

        match repo.delete(&id) {
            Err(NoteError::NotFound(message)) => {
                assert_eq!(message, format!("no note for id {}", id))
            }
            other => panic!("expected not found, got {:?}", other),
        }
        assert!(matches!(repo.read_one(&id), Err(NoteError::NotFound(_))));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let (_dir, repo) = setup();
        let first = repo.create(&valid_note()).unwrap();
        repo.delete(&first.id.to_string()).unwrap();

        let second = repo.create(&valid_note()).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn test_unreachable_store_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let repo = NoteRepository::new(DbConfig::new(dir.path().join("missing").join("notes.db")));

        assert!(matches!(repo.read_all(), Err(NoteError::Storage(_))));
        assert!(matches!(repo.create(&valid_note()), Err(NoteError::Storage(_))));
    }

    #[test]
    fn test_ping() {
        let (_dir, repo) = setup();
        assert!(repo.ping().is_ok());

        let dir = TempDir::new().unwrap();
        let repo = NoteRepository::new(DbConfig::new(dir.path().join("missing").join("notes.db")));
        assert!(matches!(repo.ping(), Err(NoteError::Storage(_))));
    }
}
