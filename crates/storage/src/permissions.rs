use std::path::Path;

/// Best-effort chmod; failures are logged and ignored
pub(crate) async fn apply_dir_mode(path: &Path, mode: u32) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        if let Err(e) = tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await {
            tracing::debug!("Could not set mode {:o} on {}: {}", mode, path.display(), e);
        }
    }

    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
}
