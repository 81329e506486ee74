use super::models::{FileSystem, WriteMode, STORAGE_SUBDIRS};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

impl FileSystem {
    pub async fn ensure_storage_structure(root: &str) -> Result<PathBuf> {
        let abs_path = Self::get_absolute_path(Path::new(root))?;

        Self::create_directory(&abs_path, "Storage root").await?;
        for subdir in STORAGE_SUBDIRS {
            Self::create_directory(&abs_path.join(subdir), subdir).await?;
        }

        Ok(abs_path)
    }

    pub fn build_storage_path(root: &Path, subdir: &str) -> PathBuf {
        root.join(subdir)
    }

    async fn create_directory(path: &Path, description: &str) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
            tracing::debug!("    Created: {} ({})", path.display(), description);
        } else {
            tracing::debug!("    Exists:  {} ({})", path.display(), description);
        }
        Ok(())
    }

    fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let path_buf = PathBuf::from(path);
        let abs = Self::get_absolute_path(&path_buf)?;
        Ok(abs.to_string_lossy().to_string())
    }

    /// Writes an upload body, creating parent directories first.
    ///
    /// `WriteMode::Exclusive` refuses to clobber an existing file.
    pub async fn write_buffer_file(dest: &Path, data: &[u8], mode: WriteMode) -> std::io::Result<u64> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true);
        match mode {
            WriteMode::Exclusive => options.create_new(true),
            WriteMode::Overwrite => options.create(true).truncate(true),
        };

        let mut file = options.open(dest).await?;
        file.write_all(data).await?;
        file.flush().await?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), dest.display());
        Ok(data.len() as u64)
    }
}
