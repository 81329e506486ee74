use crate::store::GalleryStore;
use folio_filesystem::{LEGACY_GALLERIES_DIR, UPLOADS_DIR};
use folio_models::DeleteAttempt;
use folio_utils::is_safe_component;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;

impl GalleryStore {
    /// Removes every directory a gallery may occupy.
    ///
    /// Directories come from the gallery's keys (name, slug, id) under both
    /// gallery roots, and from the parent folder of each stored image URL.
    /// Only `<root>/uploads/<x>` and `<root>/galleries/<x>` are ever touched.
    pub async fn remove_gallery_dirs<K, I>(&self, keys: &[K], images: &[I]) -> Vec<DeleteAttempt>
    where
        K: AsRef<str>,
        I: AsRef<str>,
    {
        let mut dirs = BTreeSet::new();

        let usable_keys = keys
            .iter()
            .map(|key| key.as_ref().trim())
            .filter(|key| is_safe_component(key));
        for key in usable_keys {
            dirs.insert(self.uploads_root.join(key));
            dirs.insert(self.legacy_root.join(key));
        }

        for image in images {
            if let Some(dir) = self.image_parent_dir(image.as_ref()) {
                dirs.insert(dir);
            }
        }

        let mut attempts = Vec::with_capacity(dirs.len());
        for dir in dirs {
            attempts.push(remove_entry(&dir).await);
        }
        attempts
    }

    /// `/uploads/<x>/...` or `/galleries/<x>/...` mapped onto the storage root
    fn image_parent_dir(&self, url: &str) -> Option<PathBuf> {
        let clean = url.trim().split(['?', '#']).next().unwrap_or_default();
        let relative = clean.strip_prefix('/')?.trim_start_matches('/');

        let mut segments = relative.split('/');
        let area = segments.next()?;
        let gallery = segments.next()?;
        segments.next().filter(|file| !file.is_empty())?;

        if !is_safe_component(gallery) {
            return None;
        }

        match area {
            UPLOADS_DIR => Some(self.uploads_root.join(gallery)),
            LEGACY_GALLERIES_DIR => Some(self.legacy_root.join(gallery)),
            _ => None,
        }
    }
}

async fn remove_entry(path: &Path) -> DeleteAttempt {
    let dir = path.display().to_string();

    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(_) => {
            return DeleteAttempt {
                dir,
                existed_before: false,
                removed: false,
                error: None,
            }
        }
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    match result {
        Ok(()) => {
            tracing::debug!("Removed {}", dir);
            DeleteAttempt {
                removed: fs::metadata(path).await.is_err(),
                dir,
                existed_before: true,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to remove {}: {}", dir, e);
            DeleteAttempt {
                dir,
                existed_before: true,
                removed: false,
                error: Some(e.to_string()),
            }
        }
    }
}
