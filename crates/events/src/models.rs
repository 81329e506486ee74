use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String, base_url: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { storage_root: String },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },
    ConfigError { error: String },

    // Storage layout
    StorageInit { path: String },
    StorageReady { path: String },

    // Gallery directories
    GalleryDirMigrated { from: String, to: String },
    GalleryRenamed { from: String, to: String },
    GalleryDeleted { name: String, removed: usize },

    // Uploads
    FilesStored { target: String, count: usize },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
