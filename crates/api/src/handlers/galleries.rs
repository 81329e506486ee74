use super::models::AppState;
use super::multipart::UploadForm;
use crate::errors::ApiError;
use crate::models::{
    DeleteGalleryQuery, DeleteGalleryRequest, DeleteGalleryResponse, EnsureGalleryRequest,
    EnsureGalleryResponse, GalleryUploadResponse, RenameGalleryRequest, RenameGalleryResponse,
    ResolveImagesRequest, ResolveImagesResponse,
};
use axum::{
    extract::{Multipart, Path as AxumPath, Query, State},
    response::Json,
};
use folio_events::AppEvent;
use folio_filesystem::FileSystem;
use folio_models::StoredFile;
use folio_storage::{gallery_base_url, resolve_gallery_image_url, resolve_gallery_images, GalleryName};
use folio_utils::{sanitize_upload_name, sha1_hex};

/// Repeated text part naming previous slugs or ids of the gallery
const LEGACY_KEY_FIELD: &str = "legacy_key";

/// Local previews that must never be persisted as image references
const CLIENT_ONLY_SCHEMES: [&str; 2] = ["blob:", "file:"];

pub async fn upload_gallery_images(
    State(state): State<AppState>,
    AxumPath(gallery_name): AxumPath<String>,
    mut multipart: Multipart,
) -> Result<Json<GalleryUploadResponse>, ApiError> {
    let form = UploadForm::read(&mut multipart).await?;
    if form.files.is_empty() {
        return Err(ApiError::NoFiles);
    }

    let legacy_keys = form.values(LEGACY_KEY_FIELD);
    let dir = state.store.ensure_gallery_dir(&gallery_name, &legacy_keys).await?;

    let mut urls = Vec::with_capacity(form.files.len());
    let mut files = Vec::with_capacity(form.files.len());

    for upload in &form.files {
        let file_name = sanitize_upload_name(upload.file_name.as_deref());
        let dest = dir.join(&file_name);

        let size = FileSystem::write_buffer_file(&dest, &upload.data, state.gallery_write_mode)
            .await
            .map_err(|e| ApiError::from_write(e, &file_name))?;

        let url = resolve_gallery_image_url(&gallery_name, &file_name);
        urls.push(url.clone());
        files.push(StoredFile {
            name: file_name,
            url,
            size,
            sha1: sha1_hex(&upload.data),
        });
    }

    state.events.emit(AppEvent::FilesStored {
        target: dir.display().to_string(),
        count: files.len(),
    });

    Ok(Json(GalleryUploadResponse { urls, files }))
}

/// Makes sure the gallery's directory exists, migrating a legacy one if found
pub async fn ensure_gallery(
    State(state): State<AppState>,
    AxumPath(gallery_name): AxumPath<String>,
    payload: Option<Json<EnsureGalleryRequest>>,
) -> Result<Json<EnsureGalleryResponse>, ApiError> {
    let Json(request) = payload.unwrap_or_default();

    let dir = state
        .store
        .ensure_gallery_dir(&gallery_name, &request.legacy_keys)
        .await?;

    Ok(Json(EnsureGalleryResponse {
        path: dir.display().to_string(),
        url: gallery_base_url(&gallery_name),
    }))
}

pub async fn rename_gallery(
    State(state): State<AppState>,
    AxumPath(old_name): AxumPath<String>,
    Json(request): Json<RenameGalleryRequest>,
) -> Result<Json<RenameGalleryResponse>, ApiError> {
    if request
        .images
        .iter()
        .any(|img| CLIENT_ONLY_SCHEMES.iter().any(|scheme| img.starts_with(scheme)))
    {
        return Err(ApiError::BadRequest("Images must be server URLs".to_string()));
    }

    // validate before touching the disk so a bad name leaves everything in place
    let new_name = GalleryName::parse(&request.new_name)?;

    let dir = state
        .store
        .rename_gallery_folder(&old_name, new_name.as_str(), &request.legacy_keys)
        .await?;

    let images = request
        .images
        .iter()
        .map(|img| resolve_gallery_image_url(new_name.as_str(), img))
        .collect();

    Ok(Json(RenameGalleryResponse {
        path: dir.display().to_string(),
        images,
    }))
}

/// Canonical URLs for rendering a gallery's stored images
pub async fn resolve_images(
    AxumPath(gallery_name): AxumPath<String>,
    Json(request): Json<ResolveImagesRequest>,
) -> Json<ResolveImagesResponse> {
    Json(ResolveImagesResponse {
        images: resolve_gallery_images(&gallery_name, &request.images),
    })
}

/// Removes a gallery's directories, only when called with `?deleteFiles=1`
pub async fn delete_gallery(
    State(state): State<AppState>,
    AxumPath(gallery_name): AxumPath<String>,
    Query(query): Query<DeleteGalleryQuery>,
    payload: Option<Json<DeleteGalleryRequest>>,
) -> Json<DeleteGalleryResponse> {
    if !query.delete_files() {
        tracing::debug!("Keeping files of gallery '{}'", gallery_name);
        return Json(DeleteGalleryResponse { attempts: Vec::new() });
    }

    let Json(request) = payload.unwrap_or_default();

    let mut keys = Vec::with_capacity(request.legacy_keys.len() + 1);
    keys.push(gallery_name.clone());
    keys.extend(request.legacy_keys);

    let attempts = state.store.remove_gallery_dirs(&keys, &request.images).await;

    for attempt in &attempts {
        if let Some(error) = &attempt.error {
            state.events.emit(AppEvent::Error {
                context: format!("removing {}", attempt.dir),
                error: error.clone(),
            });
        }
    }

    state.events.emit(AppEvent::GalleryDeleted {
        name: gallery_name,
        removed: attempts.iter().filter(|a| a.removed).count(),
    });

    Json(DeleteGalleryResponse { attempts })
}
