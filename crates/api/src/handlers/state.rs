use super::models::AppState;
use folio_events::EventBus;
use folio_filesystem::WriteMode;
use folio_storage::GalleryStore;
use std::sync::Arc;

impl AppState {
    pub fn new(
        store: Arc<GalleryStore>,
        events: Arc<EventBus>,
        streaming_threshold_mb: u64,
        overwrite_gallery_uploads: bool,
    ) -> Self {
        let gallery_write_mode = if overwrite_gallery_uploads {
            WriteMode::Overwrite
        } else {
            WriteMode::Exclusive
        };

        Self {
            store,
            events,
            streaming_threshold_bytes: streaming_threshold_mb * 1024 * 1024,
            gallery_write_mode,
        }
    }
}
