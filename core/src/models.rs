use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Assigned by the store on insert, never changes
    pub id: i64,
    /// Sanitized title (1-255 characters before sanitizing)
    pub title: String,
    /// Sanitized free-form body
    pub text: String,
    /// Sanitized ISO 8601 date or date-time, as sent by the caller
    pub datetime: String,
}

/// Raw note payload as received from a caller.
///
/// Fields are kept as JSON values so the validator can report a field that
/// is present but not a string. Missing fields default to `""`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteInput {
    #[serde(default = "empty_string")]
    pub title: Value,
    #[serde(default = "empty_string")]
    pub text: Value,
    #[serde(default = "empty_string")]
    pub datetime: Value,
}

impl NoteInput {
    pub fn new(title: &str, text: &str, datetime: &str) -> Self {
        Self {
            title: Value::from(title),
            text: Value::from(text),
            datetime: Value::from(datetime),
        }
    }
}

impl Default for NoteInput {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

fn empty_string() -> Value {
    Value::String(String::new())
}

/// Validated and sanitized note fields, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub datetime: String,
}

/// A single rejected field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
