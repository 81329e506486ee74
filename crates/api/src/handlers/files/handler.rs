use super::{disk, parser};
use crate::errors::ApiError;
use crate::handlers::models::AppState;
use axum::{
    extract::{Path as AxumPath, State},
    http::Uri,
    response::Response,
};
use folio_filesystem::FileSystem;

/// Serves stored images from `/uploads`, `/galleries`, `/entries` and `/blogs`
pub async fn serve_file(
    State(state): State<AppState>,
    uri: Uri,
    AxumPath(rest): AxumPath<String>,
) -> Result<Response, ApiError> {
    tracing::debug!("serve_file: requested_path = '{}'", uri.path());

    let parsed = parser::parse_request_path(uri.path(), &rest)?;

    let full_path = parsed.segments.iter().fold(
        FileSystem::build_storage_path(state.store.root(), parsed.area),
        |path, segment| path.join(segment),
    );

    disk::serve_from_disk(full_path, state.streaming_threshold_bytes).await
}
