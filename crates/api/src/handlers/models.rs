use folio_events::EventBus;
use folio_filesystem::WriteMode;
use folio_storage::GalleryStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) store: Arc<GalleryStore>,
    pub(super) events: Arc<EventBus>,
    pub(super) streaming_threshold_bytes: u64,
    pub(super) gallery_write_mode: WriteMode,
}
