use crate::errors::ApiError;
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use tokio_util::io::ReaderStream;

/// Serves a file from disk, either by streaming or loading into memory
/// The threshold is configurable via server.streaming_threshold_mb
pub async fn serve_from_disk(full_path: PathBuf, streaming_threshold_bytes: u64) -> Result<Response, ApiError> {
    let metadata = match tokio::fs::metadata(&full_path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => {
            tracing::debug!("serve_file: not a file: '{}'", full_path.display());
            return Err(ApiError::NotFound);
        }
        Err(e) => {
            tracing::debug!("serve_file: '{}' unavailable: {}", full_path.display(), e);
            return Err(ApiError::NotFound);
        }
    };

    let mime_type = mime_guess::from_path(&full_path)
        .first_or_octet_stream()
        .to_string();

    let file_size = metadata.len();

    if file_size > streaming_threshold_bytes {
        stream_large_file(full_path, mime_type, file_size).await
    } else {
        load_small_file(full_path, mime_type).await
    }
}

async fn stream_large_file(
    full_path: PathBuf,
    mime_type: String,
    file_size: u64,
) -> Result<Response, ApiError> {
    tracing::debug!(
        "serve_file: streaming large file ({:.2} MB)",
        file_size as f64 / 1024.0 / 1024.0
    );

    let file = tokio::fs::File::open(&full_path).await.map_err(|e| {
        tracing::error!(
            "serve_file: Failed to open file '{}': {}",
            full_path.display(),
            e
        );
        ApiError::NotFound
    })?;

    let body = Body::from_stream(ReaderStream::new(file));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime_type),
            (header::CONTENT_LENGTH, file_size.to_string()),
        ],
        body,
    )
        .into_response())
}

async fn load_small_file(full_path: PathBuf, mime_type: String) -> Result<Response, ApiError> {
    let content = tokio::fs::read(&full_path).await.map_err(|e| {
        tracing::error!(
            "serve_file: Failed to read file '{}': {}",
            full_path.display(),
            e
        );
        ApiError::NotFound
    })?;

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, mime_type)], content).into_response())
}
