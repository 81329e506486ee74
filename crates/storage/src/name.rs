use crate::StorageError;
use std::fmt;

/// Trimmed gallery display name that is safe to use as one directory component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GalleryName(String);

impl GalleryName {
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        let trimmed = raw.trim();

        let reason = if trimmed.is_empty() {
            Some("name is blank")
        } else if trimmed.contains(['/', '\\']) {
            Some("name contains a path separator")
        } else if trimmed == "." || trimmed == ".." {
            Some("name refers to a relative directory")
        } else if trimmed.contains('\0') {
            Some("name contains a null byte")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StorageError::InvalidName {
                name: raw.to_string(),
                reason,
            }),
            None => Ok(Self(trimmed.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GalleryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GalleryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_valid_names() {
        let name = GalleryName::parse("  Summer Trip ").unwrap();
        assert_eq!(name.as_str(), "Summer Trip");
        assert_eq!(name.to_string(), "Summer Trip");
    }

    #[test]
    fn rejects_blank_and_separators() {
        for raw in ["", "   ", "A/B", "A\\B", "/", "..", ".", "a\0b"] {
            assert!(
                matches!(GalleryName::parse(raw), Err(StorageError::InvalidName { .. })),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn dots_inside_names_are_fine() {
        assert!(GalleryName::parse("v1.2 ... trip").is_ok());
    }
}
