use crate::errors::ApiError;

/// Validates one decoded path segment to prevent path traversal attacks
pub fn validate_path_component(component: &str) -> Result<(), ApiError> {
    if component.is_empty() {
        return Err(ApiError::InvalidPath("Empty path segment".to_string()));
    }

    if component == "." || component == ".." {
        return Err(ApiError::InvalidPath(
            "Path contains '..' (path traversal attempt)".to_string(),
        ));
    }

    if component.contains('\0') {
        return Err(ApiError::InvalidPath("Path contains null byte".to_string()));
    }

    // A decoded segment may still carry separators (%2F, %5C)
    if component.contains(['/', '\\']) {
        return Err(ApiError::InvalidPath(
            "Path segment contains a separator".to_string(),
        ));
    }

    Ok(())
}
