use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use folio_storage::StorageError;
use thiserror::Error;

use crate::models::{ErrorDetail, ErrorResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidName(String),

    #[error("Invalid upload target: {0}")]
    InvalidTarget(String),

    #[error("No files")]
    NoFiles,

    #[error("File already exists: {0}")]
    FileExists(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ApiError {
    /// Maps a failed upload write, keeping exclusive-create conflicts distinct
    pub fn from_write(err: std::io::Error, file_name: &str) -> Self {
        if err.kind() == std::io::ErrorKind::AlreadyExists {
            ApiError::FileExists(file_name.to_string())
        } else {
            ApiError::IoError(err)
        }
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidName(_) => (StatusCode::BAD_REQUEST, "INVALID_NAME"),
            ApiError::InvalidTarget(_) => (StatusCode::BAD_REQUEST, "INVALID_TARGET"),
            ApiError::NoFiles => (StatusCode::BAD_REQUEST, "NO_FILES"),
            ApiError::FileExists(_) => (StatusCode::CONFLICT, "FILE_EXISTS"),
            ApiError::InvalidPath(_) => (StatusCode::BAD_REQUEST, "INVALID_PATH"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::IoError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidName { .. } => ApiError::InvalidName(err.to_string()),
            StorageError::InvalidTarget(inner) => ApiError::InvalidTarget(inner.to_string()),
            StorageError::IoError(inner) => ApiError::IoError(inner),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let message = match self {
            ApiError::NotFound => "Resource not found".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
