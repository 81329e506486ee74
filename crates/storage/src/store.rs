use crate::name::GalleryName;
use crate::permissions::apply_dir_mode;
use crate::StorageError;
use folio_events::{AppEvent, EventBus};
use folio_filesystem::{FileSystem, LEGACY_GALLERIES_DIR, UPLOADS_DIR};
use folio_models::UploadTarget;
use folio_utils::{is_safe_component, validate_target_id};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Gallery, entry and blog directories under one storage root
pub struct GalleryStore {
    pub(crate) root: PathBuf,
    pub(crate) uploads_root: PathBuf,
    pub(crate) legacy_root: PathBuf,
    dir_mode: u32,
    events: Option<Arc<EventBus>>,
}

impl GalleryStore {
    pub fn new(root: impl Into<PathBuf>, dir_mode: u32) -> Self {
        let root = root.into();
        Self {
            uploads_root: FileSystem::build_storage_path(&root, UPLOADS_DIR),
            legacy_root: FileSystem::build_storage_path(&root, LEGACY_GALLERIES_DIR),
            root,
            dir_mode,
            events: None,
        }
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn uploads_root(&self) -> &Path {
        &self.uploads_root
    }

    pub fn legacy_root(&self) -> &Path {
        &self.legacy_root
    }

    pub fn gallery_path(&self, name: &GalleryName) -> PathBuf {
        self.uploads_root.join(name.as_str())
    }

    /// Returns the canonical directory for `gallery_name`, creating it if needed.
    ///
    /// When the canonical directory is missing, each legacy key is tried in
    /// order (canonical root first, then the legacy `galleries/` root) and the
    /// first existing directory is renamed into place. Failed renames fall
    /// through to the next candidate; a fresh directory is created last.
    pub async fn ensure_gallery_dir(
        &self,
        gallery_name: &str,
        legacy_keys: &[String],
    ) -> Result<PathBuf, StorageError> {
        let name = GalleryName::parse(gallery_name)?;
        let target = self.gallery_path(&name);

        if !is_dir(&target).await {
            fs::create_dir_all(&self.uploads_root).await?;

            let candidates = self.candidate_paths(legacy_keys.iter().map(String::as_str));
            if self.migrate_first(&candidates, &target).await.is_none() {
                fs::create_dir_all(&target).await?;
                tracing::debug!("Created gallery directory {}", target.display());
            }
        }

        apply_dir_mode(&target, self.dir_mode).await;
        Ok(target)
    }

    /// Moves a gallery's directory to `new_name`.
    ///
    /// Candidates are `old_name` followed by the legacy keys. A missing source
    /// is not an error: the new directory is created empty instead.
    pub async fn rename_gallery_folder(
        &self,
        old_name: &str,
        new_name: &str,
        legacy_keys: &[String],
    ) -> Result<PathBuf, StorageError> {
        let name = GalleryName::parse(new_name)?;
        let target = self.gallery_path(&name);

        fs::create_dir_all(&self.uploads_root).await?;

        let keys = std::iter::once(old_name).chain(legacy_keys.iter().map(String::as_str));
        let candidates = self.candidate_paths(keys);

        match self.migrate_first(&candidates, &target).await {
            Some(source) => {
                self.emit(AppEvent::GalleryRenamed {
                    from: source.display().to_string(),
                    to: target.display().to_string(),
                });
            }
            None => {
                tracing::debug!(
                    "No existing directory for '{}', creating {}",
                    old_name,
                    target.display()
                );
                fs::create_dir_all(&target).await?;
            }
        }

        apply_dir_mode(&target, self.dir_mode).await;
        Ok(target)
    }

    /// `<root>/<entries|blogs>/<id>`; ids must match `[A-Za-z0-9_-]+`
    pub async fn ensure_target_dir(&self, target: UploadTarget, id: &str) -> Result<PathBuf, StorageError> {
        validate_target_id(id)?;

        let dir = FileSystem::build_storage_path(&self.root, target.dir_name()).join(id);
        fs::create_dir_all(&dir).await?;
        apply_dir_mode(&dir, self.dir_mode).await;

        Ok(dir)
    }

    pub async fn ensure_entry_dir(&self, id: &str) -> Result<PathBuf, StorageError> {
        self.ensure_target_dir(UploadTarget::Entries, id).await
    }

    pub async fn ensure_blog_dir(&self, id: &str) -> Result<PathBuf, StorageError> {
        self.ensure_target_dir(UploadTarget::Blogs, id).await
    }

    /// Directories a gallery may occupy, in search order: each usable key under
    /// the canonical root, then under the legacy root
    pub(crate) fn candidate_paths<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        for key in keys {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            if !is_safe_component(key) {
                tracing::warn!("Ignoring unsafe legacy gallery key '{}'", key);
                continue;
            }

            for root in [&self.uploads_root, &self.legacy_root] {
                let path = root.join(key);
                if !candidates.contains(&path) {
                    candidates.push(path);
                }
            }
        }

        candidates
    }

    /// Renames the first existing candidate onto `target`, returning its old path
    async fn migrate_first(&self, candidates: &[PathBuf], target: &Path) -> Option<PathBuf> {
        for source in candidates {
            if source == target || !is_dir(source).await {
                continue;
            }

            match fs::rename(source, target).await {
                Ok(()) => {
                    self.emit(AppEvent::GalleryDirMigrated {
                        from: source.display().to_string(),
                        to: target.display().to_string(),
                    });
                    return Some(source.clone());
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to move {} to {}: {}",
                        source.display(),
                        target.display(),
                        e
                    );
                }
            }
        }

        None
    }

    pub(crate) fn emit(&self, event: AppEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

pub(crate) async fn is_dir(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
