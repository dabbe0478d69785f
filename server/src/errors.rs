use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notes_core::{FieldError, NoteError};
use thiserror::Error;
use tracing::error;

use crate::model::note::{ErrorResponse, FieldErrorDto};

/// Errors that stop the server from starting or serving
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Missing environment variable {1}: {0}")]
    EnvError(std::env::VarError, String),

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),

    #[error("Cannot serve: {0}")]
    CannotServe(std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

pub type RestResult<T> = Result<T, RestError>;

/// Errors returned from request handlers
#[derive(Debug, Error)]
pub enum RestError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<NoteError> for RestError {
    fn from(e: NoteError) -> Self {
        match e {
            NoteError::Validation(errors) => RestError::Validation(errors),
            NoteError::NotFound(message) => RestError::NotFound(message),
            e @ (NoteError::Storage(_) | NoteError::InvariantViolation(_)) => {
                RestError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match self {
            RestError::Validation(errors) => {
                let body: Vec<FieldErrorDto> = errors.into_iter().map(|e| e.into()).collect();
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            RestError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message })).into_response()
            }
            RestError::Internal(detail) => {
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation_is_internal() {
        let rest = RestError::from(NoteError::InvariantViolation("two rows".to_string()));

        assert!(matches!(rest, RestError::Internal(_)));
        assert_eq!(
            rest.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_error_is_internal() {
        let rest = RestError::from(NoteError::Storage(rusqlite::Error::InvalidQuery));

        assert!(matches!(rest, RestError::Internal(_)));
        assert_eq!(
            rest.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_and_not_found_statuses() {
        let validation = RestError::from(NoteError::Validation(vec![FieldError::new(
            "title", "bad",
        )]));
        let missing = RestError::from(NoteError::not_found("7"));

        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }
}
