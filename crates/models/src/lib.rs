use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored gallery image value, classified by how it must be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// Absolute `http(s)://` URL or `data:` URI, never remapped
    External(String),
    /// Relative URL written under `/uploads/<gallery>/` or the legacy `/galleries/<gallery>/`
    StoredPath {
        root: String,
        gallery: String,
        rest: String,
    },
    /// Bare filename living in the gallery directory
    FileName(String),
}

impl ImageReference {
    pub fn is_external(&self) -> bool {
        matches!(self, ImageReference::External(_))
    }
}

/// A file written to disk by an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub name: String,
    pub url: String,
    pub size: u64,
    pub sha1: String,
}

/// Non-gallery upload destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadTarget {
    Entries,
    Blogs,
}

impl UploadTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "entries" => Some(UploadTarget::Entries),
            "blogs" => Some(UploadTarget::Blogs),
            _ => None,
        }
    }

    /// Directory under the storage root, also the first URL segment
    pub fn dir_name(&self) -> &'static str {
        match self {
            UploadTarget::Entries => "entries",
            UploadTarget::Blogs => "blogs",
        }
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Outcome of one directory removal during a gallery delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAttempt {
    pub dir: String,
    pub existed_before: bool,
    pub removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
