/// Canonical gallery directories and the `/uploads/...` URL space
pub const UPLOADS_DIR: &str = "uploads";
/// Gallery directories created before the switch to `uploads/`
pub const LEGACY_GALLERIES_DIR: &str = "galleries";
pub const ENTRIES_DIR: &str = "entries";
pub const BLOGS_DIR: &str = "blogs";

/// Every subtree that lives directly under the storage root
pub const STORAGE_SUBDIRS: [&str; 4] = [UPLOADS_DIR, LEGACY_GALLERIES_DIR, ENTRIES_DIR, BLOGS_DIR];

/// Filesystem helpers for the storage root
pub struct FileSystem;

/// How an upload treats a file that already exists at the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail with `AlreadyExists`
    Exclusive,
    Overwrite,
}
