/// Slide media storage on the local filesystem
use crate::constants::SLIDE_UPLOAD_DIR;
use crate::error::AnnounceError;
use crate::utils::sanitization::{sanitize_filename_strict, validate_media_path};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store `data` and return its path relative to the media root
    async fn save(&self, filename: &str, data: &[u8]) -> Result<String, AnnounceError>;
    /// Remove a stored file; missing files are not an error
    async fn delete(&self, path: &str) -> Result<(), AnnounceError>;
    /// Verify the media root is usable
    async fn check(&self) -> Result<(), AnnounceError>;
}

pub struct LocalMediaStorage {
    root: PathBuf,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, AnnounceError> {
        validate_media_path(path).map_err(AnnounceError::Media)?;
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(&self, filename: &str, data: &[u8]) -> Result<String, AnnounceError> {
        let name = format!(
            "{}_{}",
            uuid::Uuid::new_v4().simple(),
            sanitize_filename_strict(filename)
        );
        let relative = format!("{}/{}", SLIDE_UPLOAD_DIR, name);
        let target = self.resolve(&relative)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, data).await?;

        tracing::info!(path = %relative, size = data.len(), "Stored slide");
        Ok(relative)
    }

    async fn delete(&self, path: &str) -> Result<(), AnnounceError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                tracing::debug!(path = %path, "Removed slide");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn check(&self) -> Result<(), AnnounceError> {
        let dir = self.root.join(SLIDE_UPLOAD_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        let metadata = tokio::fs::metadata(&dir).await?;
        if metadata.permissions().readonly() {
            return Err(AnnounceError::Media(format!(
                "Media directory {} is read-only",
                dir.display()
            )));
        }
        Ok(())
    }
}
