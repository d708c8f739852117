use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<educonnect_core::Error> for AppError {
    fn from(error: educonnect_core::Error) -> Self {
        use educonnect_core::Error as CoreError;
        match error {
            CoreError::InvalidInput(message) => Self::BadRequest(message),
            CoreError::UsernameTaken(username) => {
                Self::Conflict(format!("username already taken: {username}"))
            }
            CoreError::NoteNotFound(id) => Self::NotFound(format!("note {id}")),
            CoreError::BlobNotFound(name) => Self::NotFound(format!("file {name}")),
            CoreError::Database(_) | CoreError::LibSql(_) | CoreError::Io(_) => {
                Self::Internal(error.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
