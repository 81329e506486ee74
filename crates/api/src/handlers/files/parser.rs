use super::models::ParsedRequest;
use super::validator::validate_path_component;
use crate::errors::ApiError;
use folio_filesystem::STORAGE_SUBDIRS;

/// Splits a request into its storage area and the decoded path below it.
///
/// `raw_path` is the undecoded request path and only supplies the area;
/// `decoded_rest` is the already percent-decoded wildcard capture.
pub fn parse_request_path(raw_path: &str, decoded_rest: &str) -> Result<ParsedRequest, ApiError> {
    let first = raw_path
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();

    let area = STORAGE_SUBDIRS
        .iter()
        .copied()
        .find(|area| *area == first)
        .ok_or_else(|| {
            tracing::warn!("serve_file: unknown storage area '{}'", first);
            ApiError::NotFound
        })?;

    let rest = decoded_rest.trim_start_matches('/');
    if rest.is_empty() {
        tracing::warn!("serve_file: empty path under '{}'", area);
        return Err(ApiError::NotFound);
    }

    let segments: Vec<String> = rest.split('/').map(str::to_string).collect();
    for segment in &segments {
        validate_path_component(segment)?;
    }

    tracing::debug!("serve_file: area = '{}', segments = {:?}", area, segments);

    Ok(ParsedRequest { area, segments })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gallery_image() {
        let parsed =
            parse_request_path("/uploads/Summer%20Trip/a.jpg", "Summer Trip/a.jpg").unwrap();
        assert_eq!(
            parsed,
            ParsedRequest {
                area: "uploads",
                segments: vec!["Summer Trip".to_string(), "a.jpg".to_string()],
            }
        );
    }

    #[test]
    fn rejects_unknown_area_and_traversal() {
        assert!(matches!(
            parse_request_path("/secrets/a", "a"),
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            parse_request_path("/uploads/x/../../etc/passwd", "x/../../etc/passwd"),
            Err(ApiError::InvalidPath(_))
        ));
        assert!(matches!(
            parse_request_path("/entries/", ""),
            Err(ApiError::NotFound)
        ));
        assert!(matches!(
            parse_request_path("/blogs/a//b", "a//b"),
            Err(ApiError::InvalidPath(_))
        ));
    }
}
