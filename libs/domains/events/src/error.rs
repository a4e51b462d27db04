use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event {0} already exists")]
    Conflict(Uuid),

    #[error("Event store unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Corrupt record {key}: {reason}")]
    CorruptRecord { key: String, reason: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Event {0} not found")]
    NotFound(Uuid),
}

pub type EventResult<T> = Result<T, EventError>;

/// Storage failures become opaque 500s; their detail is only logged.
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(id) => AppError::NotFound(format!("Event {} not found", id)),
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::Conflict(id) => AppError::Internal {
                code: ErrorCode::DuplicateKey,
                detail: format!("event {} already exists", id),
            },
            EventError::StorageUnavailable(detail) => AppError::Internal {
                code: ErrorCode::StorageUnavailable,
                detail,
            },
            EventError::CorruptRecord { key, reason } => AppError::Internal {
                code: ErrorCode::CorruptRecord,
                detail: format!("{}: {}", key, reason),
            },
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::StorageUnavailable(err.to_string())
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(err: validator::ValidationErrors) -> Self {
        EventError::Validation(err.to_string())
    }
}
