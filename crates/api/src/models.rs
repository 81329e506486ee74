use folio_models::{DeleteAttempt, StoredFile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage_root: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryUploadResponse {
    pub urls: Vec<String>,
    pub files: Vec<StoredFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnsureGalleryRequest {
    #[serde(default)]
    pub legacy_keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsureGalleryResponse {
    pub path: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameGalleryRequest {
    pub new_name: String,
    #[serde(default)]
    pub legacy_keys: Vec<String>,
    /// Stored image references to rewrite under the new name
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameGalleryResponse {
    pub path: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveImagesRequest {
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveImagesResponse {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteGalleryRequest {
    #[serde(default)]
    pub legacy_keys: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteGalleryQuery {
    #[serde(rename = "deleteFiles", default)]
    pub delete_files: Option<String>,
}

impl DeleteGalleryQuery {
    pub fn delete_files(&self) -> bool {
        self.delete_files.as_deref() == Some("1")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGalleryResponse {
    pub attempts: Vec<DeleteAttempt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetUploadResponse {
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
