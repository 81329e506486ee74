/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    120  // Large photo batches over slow links
}

pub fn max_body_size() -> usize {
    200
}

pub fn max_concurrent_requests() -> usize {
    256
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn streaming_threshold_mb() -> u64 {
    16  // Files larger than 16MB are streamed instead of read into memory
}

pub fn enable_compression() -> bool {
    true
}

// Storage defaults
pub fn storage_root() -> String {
    "blog-uploads".to_string()
}

pub fn dir_mode() -> u32 {
    0o755
}

pub fn overwrite_gallery_uploads() -> bool {
    true
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        root: storage_root(),
        dir_mode: dir_mode(),
        overwrite_gallery_uploads: overwrite_gallery_uploads(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# Folio Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 8080                          # Server port
base_url = "http://localhost:8080"   # Public base URL

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 120                   # Request timeout in seconds
max_concurrent_requests = 256        # Max simultaneous requests
max_body_size_mb = 200               # Max upload body size in MB
streaming_threshold_mb = 16          # Files >16MB streamed, smaller ones read whole
enable_compression = true            # HTTP compression (gzip/brotli/deflate)

# CORS
allowed_origins = ["*"]              # "*" = all origins | ["https://example.com"] for production

# ===============================================================================
# STORAGE
# ===============================================================================
# Layout: {root}/uploads/<gallery name>/  canonical gallery folders
#         {root}/galleries/<slug or id>/  legacy gallery folders (migrated on demand)
#         {root}/entries/<id>/            entry images
#         {root}/blogs/<id>/              blog images
# FOLIO_STORAGE_ROOT overrides root at startup.
[storage]
root = "blog-uploads"                # Storage root (relative to working directory if not absolute)
dir_mode = 493                       # Directory permissions (493 = 0o755)
overwrite_gallery_uploads = true     # Gallery uploads replace files with the same name
"#;
