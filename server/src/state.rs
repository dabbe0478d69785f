use notes_core::{DbConfig, NoteRepository, NoteResult};

use crate::errors::{RestError, RestResult};

#[derive(Clone)]
pub struct AppState {
    pub notes: NoteRepository,
}

impl AppState {
    pub fn new(db: DbConfig) -> Self {
        Self {
            notes: NoteRepository::new(db),
        }
    }

    /// Run a repository call on the blocking thread pool.
    ///
    /// rusqlite is synchronous, so every handler goes through here instead of
    /// touching the database on a runtime worker.
    pub async fn with_notes<T, F>(&self, f: F) -> RestResult<T>
    where
        F: FnOnce(&NoteRepository) -> NoteResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let notes = self.notes.clone();

        tokio::task::spawn_blocking(move || f(&notes))
            .await
            .map_err(|e| RestError::Internal(format!("Note task failed: {}", e)))?
            .map_err(RestError::from)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use notes_core::{NoteError, NoteInput};
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_with_notes_runs_repository_call() {
        let dir = TempDir::new().unwrap();
        let state = AppState::new(DbConfig::new(dir.path().join("notes.db")));

        let created = state
            .with_notes(|notes| notes.create(&NoteInput::new("A", "b", "2023-01-01")))
            .await
            .unwrap();
        let id = created.id.to_string();
        let read = state.with_notes(move |notes| notes.read_one(&id)).await.unwrap();

        assert_eq!(created, read);
    }

    #[tokio::test]
    async fn test_with_notes_maps_note_errors() {
        let dir = TempDir::new().unwrap();
        let state = AppState::new(DbConfig::new(dir.path().join("notes.db")));

        let missing = state.with_notes(|notes| notes.read_one("42")).await;
        let failed = state
            .with_notes(|_| -> NoteResult<()> { Err(NoteError::InvariantViolation("x".into())) })
            .await;

        assert!(matches!(missing, Err(RestError::NotFound(_))));
        assert!(matches!(failed, Err(RestError::Internal(_))));
    }

    #[tokio::test]
    async fn test_with_notes_reports_panicked_task() {
        let dir = TempDir::new().unwrap();
        let state = AppState::new(DbConfig::new(dir.path().join("notes.db")));

        let result = state
            .with_notes(|_| -> NoteResult<()> { panic!("boom") })
            .await;

        assert!(matches!(result, Err(RestError::Internal(_))));
    }
}
