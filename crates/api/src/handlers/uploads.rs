use super::models::AppState;
use super::multipart::UploadForm;
use crate::errors::ApiError;
use crate::models::TargetUploadResponse;
use axum::{
    extract::{Multipart, State},
    response::Json,
};
use folio_events::AppEvent;
use folio_filesystem::{FileSystem, WriteMode};
use folio_models::UploadTarget;
use folio_utils::unique_name;

/// Form field names as sent by existing clients, each with a snake_case alias
const TARGET_TYPE_FIELDS: [&str; 2] = ["targetType", "target_type"];
const TARGET_ID_FIELDS: [&str; 2] = ["targetId", "target_id"];

/// Entry and blog image uploads; names get a random suffix and never overwrite
pub async fn upload_to_target(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TargetUploadResponse>, ApiError> {
    let form = UploadForm::read(&mut multipart).await?;

    let target_type = form.first_field(&TARGET_TYPE_FIELDS);
    let target_id = form.first_field(&TARGET_ID_FIELDS);

    let (target_type, target_id) = match (target_type, target_id) {
        (Some(target_type), Some(target_id)) => (target_type, target_id),
        _ => {
            return Err(ApiError::BadRequest(
                "targetType and targetId are required".to_string(),
            ))
        }
    };

    let target = UploadTarget::parse(target_type)
        .ok_or_else(|| ApiError::InvalidTarget(format!("Unsupported target type '{}'", target_type)))?;

    let dir = state.store.ensure_target_dir(target, target_id).await?;

    let mut urls = Vec::with_capacity(form.files.len());
    for upload in &form.files {
        let file_name = unique_name(upload.file_name.as_deref().unwrap_or("upload"));

        FileSystem::write_buffer_file(&dir.join(&file_name), &upload.data, WriteMode::Exclusive)
            .await
            .map_err(|e| ApiError::from_write(e, &file_name))?;

        urls.push(format!("/{}/{}/{}", target.dir_name(), target_id, file_name));
    }

    state.events.emit(AppEvent::FilesStored {
        target: dir.display().to_string(),
        count: urls.len(),
    });

    Ok(Json(TargetUploadResponse { urls }))
}
