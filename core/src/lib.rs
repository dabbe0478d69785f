#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod validate;

// Re-export commonly used types
pub use db::{open_db, DbConfig, NoteRepository};
pub use error::{NoteError, NoteResult};
pub use models::{FieldError, NewNote, Note, NoteInput};
pub use validate::{is_iso8601, prepare, sanitize, validate};
