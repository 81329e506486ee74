use crate::UtilsError;

/// True when `value` can be joined onto a directory as a single path component
pub fn is_safe_component(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(['/', '\\', '\0'])
}

/// Entry and blog ids are restricted to `[A-Za-z0-9_-]+`
pub fn validate_target_id(id: &str) -> Result<(), UtilsError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(UtilsError::InvalidTargetId(id.to_string()))
    }
}
