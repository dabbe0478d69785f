use notes_core::{FieldError, Note, NoteInput};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Note DTO for API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct NoteDto {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// ISO 8601 date or date-time
    pub datetime: String,
}

impl From<Note> for NoteDto {
    fn from(note: Note) -> Self {
        NoteDto {
            id: note.id,
            title: note.title,
            text: note.text,
            datetime: note.datetime,
        }
    }
}

/// Body of create and update requests.
///
/// Fields are untyped so a wrong type is reported per field instead of
/// rejecting the whole body. Missing fields count as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NotePayload {
    /// 1 to 255 characters
    #[serde(default = "empty_string")]
    pub title: Value,
    #[serde(default = "empty_string")]
    pub text: Value,
    /// ISO 8601 date or date-time
    #[serde(default = "empty_string")]
    pub datetime: Value,
}

fn empty_string() -> Value {
    Value::String(String::new())
}

impl From<NotePayload> for NoteInput {
    fn from(payload: NotePayload) -> Self {
        NoteInput {
            title: payload.title,
            text: payload.text,
            datetime: payload.datetime,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorDto {
    fn from(e: FieldError) -> Self {
        FieldErrorDto {
            field: e.field,
            message: e.message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
}
