use thiserror::Error;

use crate::models::FieldError;

pub type NoteResult<T> = Result<T, NoteError>;

/// Outcome of a repository operation that did not produce its item
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note failed validation on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl NoteError {
    pub fn not_found(id: &str) -> Self {
        NoteError::NotFound(format!("no note for id {}", id))
    }
}
