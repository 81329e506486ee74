use folio_filesystem::{LEGACY_GALLERIES_DIR, UPLOADS_DIR};
use folio_models::ImageReference;
use folio_utils::sanitize_gallery_file_name;

/// URL prefix every canonical gallery image lives under
pub const UPLOADS_URL_ROOT: &str = "/uploads";

/// `/uploads/<trimmed name>`
pub fn gallery_base_url(gallery_name: &str) -> String {
    format!("{}/{}", UPLOADS_URL_ROOT, gallery_name.trim())
}

/// Sorts a stored image value into external, stored-path or bare-filename form
pub fn classify_image_reference(value: &str) -> ImageReference {
    let value = value.trim();

    if is_external(value) {
        return ImageReference::External(value.to_string());
    }

    match split_stored_path(value) {
        Some((root, gallery, rest)) => ImageReference::StoredPath {
            root: root.to_string(),
            gallery: gallery.to_string(),
            rest: rest.to_string(),
        },
        None => ImageReference::FileName(value.to_string()),
    }
}

/// Canonical public URL for a stored gallery image.
///
/// Stored `/uploads/<old>/...` and `/galleries/<old>/...` paths are rebuilt
/// under the current gallery name, so renames never break old references.
/// External URLs pass through and anything else is treated as a filename.
/// A blank gallery name returns `value` untouched; a blank value returns the
/// gallery's base URL.
pub fn resolve_gallery_image_url(gallery_name: &str, value: &str) -> String {
    if gallery_name.trim().is_empty() {
        return value.to_string();
    }

    let base = gallery_base_url(gallery_name);

    if value.trim().is_empty() {
        return base;
    }

    match classify_image_reference(value) {
        ImageReference::External(url) => url,
        ImageReference::StoredPath { rest, .. } => format!("{}/{}", base, rest),
        ImageReference::FileName(name) => {
            format!("{}/{}", base, sanitize_gallery_file_name(&name))
        }
    }
}

/// Resolves a stored image list for rendering, dropping blank entries
pub fn resolve_gallery_images<S: AsRef<str>>(gallery_name: &str, values: &[S]) -> Vec<String> {
    values
        .iter()
        .filter_map(|value| {
            let value: &str = value.as_ref();
            if value.trim().is_empty() {
                None
            } else {
                Some(resolve_gallery_image_url(gallery_name, value))
            }
        })
        .collect()
}

fn is_external(value: &str) -> bool {
    starts_with_ignore_case(value, "http://")
        || starts_with_ignore_case(value, "https://")
        || value.starts_with("data:")
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Matches `/uploads/<gallery>/<rest>` and `/galleries/<gallery>/<rest>`
fn split_stored_path(value: &str) -> Option<(&str, &str, &str)> {
    let (root, remainder) = value.strip_prefix('/')?.split_once('/')?;
    if root != UPLOADS_DIR && root != LEGACY_GALLERIES_DIR {
        return None;
    }

    let (gallery, rest) = remainder.split_once('/')?;
    if gallery.is_empty() || rest.is_empty() || rest.contains(is_line_terminator) {
        return None;
    }

    Some((root, gallery, rest))
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_filename_goes_under_gallery() {
        assert_eq!(
            resolve_gallery_image_url("Summer Trip", "photo.jpg"),
            "/uploads/Summer Trip/photo.jpg"
        );
        assert_eq!(
            resolve_gallery_image_url("  Summer Trip  ", "My Photo!.JPG"),
            "/uploads/Summer Trip/My_Photo_.jpg"
        );
    }

    #[test]
    fn external_references_pass_through() {
        assert_eq!(
            resolve_gallery_image_url("Summer Trip", "https://cdn.example.com/x.jpg"),
            "https://cdn.example.com/x.jpg"
        );
        assert_eq!(
            resolve_gallery_image_url("Summer Trip", "HTTP://CDN.example.com/x.jpg"),
            "HTTP://CDN.example.com/x.jpg"
        );
        assert_eq!(
            resolve_gallery_image_url("Summer Trip", " data:image/png;base64,AAAA "),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn stored_paths_follow_renames() {
        assert_eq!(
            resolve_gallery_image_url("New Name", "/galleries/old-slug/pic.png"),
            "/uploads/New Name/pic.png"
        );
        assert_eq!(
            resolve_gallery_image_url("New Name", "/uploads/Old Name/pic.png"),
            "/uploads/New Name/pic.png"
        );
        assert_eq!(
            resolve_gallery_image_url("X", "/uploads/a/b/c.jpg"),
            "/uploads/X/b/c.jpg"
        );
    }

    #[test]
    fn resolving_twice_is_stable() {
        let once = resolve_gallery_image_url("Summer Trip", "/galleries/summer-trip/a.jpg");
        assert_eq!(resolve_gallery_image_url("Summer Trip", &once), once);
    }

    #[test]
    fn blank_inputs() {
        assert_eq!(resolve_gallery_image_url("", "photo.jpg"), "photo.jpg");
        assert_eq!(resolve_gallery_image_url("   ", " raw "), " raw ");
        assert_eq!(resolve_gallery_image_url("Summer Trip", ""), "/uploads/Summer Trip");
        assert_eq!(resolve_gallery_image_url("Summer Trip", "  "), "/uploads/Summer Trip");
    }

    // Known edge: only a leading slash makes a value a stored path, so filenames
    // that merely start with "uploads" or "galleries" are sanitized as filenames.
    #[test]
    fn names_starting_with_root_words_are_filenames() {
        assert_eq!(
            resolve_gallery_image_url("X", "uploads/x.jpg"),
            "/uploads/X/x.jpg"
        );
        assert_eq!(
            resolve_gallery_image_url("X", "galleries-cover.jpg"),
            "/uploads/X/galleries-cover.jpg"
        );
        // too few segments to be a stored path
        assert_eq!(resolve_gallery_image_url("X", "/uploads/x.jpg"), "/uploads/X/x.jpg");
        // other roots are not remapped, only their last segment survives
        assert_eq!(resolve_gallery_image_url("X", "/entries/abc/x.jpg"), "/uploads/X/x.jpg");
    }

    #[test]
    fn classification() {
        assert!(classify_image_reference("https://a/b").is_external());
        assert_eq!(
            classify_image_reference("/galleries/slug/a.jpg"),
            ImageReference::StoredPath {
                root: "galleries".to_string(),
                gallery: "slug".to_string(),
                rest: "a.jpg".to_string(),
            }
        );
        assert_eq!(
            classify_image_reference("/uploads//a.jpg"),
            ImageReference::FileName("/uploads//a.jpg".to_string())
        );
        assert_eq!(
            classify_image_reference("/uploads/g/a\nb.jpg"),
            ImageReference::FileName("/uploads/g/a\nb.jpg".to_string())
        );
    }

    #[test]
    fn image_lists_drop_blanks() {
        let images = vec![
            "a.jpg".to_string(),
            " ".to_string(),
            "/galleries/old/b.jpg".to_string(),
        ];
        assert_eq!(
            resolve_gallery_images("Trip", &images),
            vec!["/uploads/Trip/a.jpg".to_string(), "/uploads/Trip/b.jpg".to_string()]
        );
    }
}
