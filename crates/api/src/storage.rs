//! Media storage for uploaded pet photos and gallery images.
//!
//! Handlers talk to the [`MediaStorage`] trait only; the binary wires in
//! [`LocalMediaStorage`], which writes under `MEDIA_ROOT` and hands back
//! references under `MEDIA_URL`. Bytes are written synchronously within the
//! uploading request and are not cached.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use image::ImageFormat;
use pawhaven_core::error::CoreError;
use uuid::Uuid;

/// Subdirectory for pet photos.
pub const FOLDER_PETS: &str = "pets";
/// Subdirectory for gallery images.
pub const FOLDER_GALLERY: &str = "gallery";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reference '{0}' is not managed by this storage")]
    ForeignReference(String),
}

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Persist `bytes` under `folder` and return the public reference.
    async fn save(
        &self,
        folder: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError>;

    /// Remove a previously saved file. Missing files are not an error.
    async fn delete(&self, reference: &str) -> Result<(), StorageError>;
}

/// Filesystem-backed storage.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    /// Map a public reference back to a path under `root`.
    fn resolve(&self, reference: &str) -> Result<PathBuf, StorageError> {
        let prefix = self.url_prefix.trim_end_matches('/');
        let relative = reference
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::ForeignReference(reference.to_string()))?;

        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::ForeignReference(reference.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(
        &self,
        folder: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!("{}.{extension}", Uuid::new_v4().simple());
        tokio::fs::write(dir.join(&filename), bytes).await?;

        let prefix = self.url_prefix.trim_end_matches('/');
        Ok(format!("{prefix}/{folder}/{filename}"))
    }

    async fn delete(&self, reference: &str) -> Result<(), StorageError> {
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Check that an upload is a supported image and return the file extension
/// to store it under. Detection uses the magic bytes, not the client's
/// filename or content type.
pub fn sniff_image(field: &'static str, bytes: &[u8]) -> Result<&'static str, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::validation(field, "The submitted file is empty"));
    }
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok("png"),
        Ok(ImageFormat::Jpeg) => Ok("jpg"),
        Ok(ImageFormat::Gif) => Ok("gif"),
        Ok(ImageFormat::WebP) => Ok("webp"),
        _ => Err(CoreError::validation(
            field,
            "Upload a valid image. The file you uploaded was either not an image or a \
             corrupted image",
        )),
    }
}

/// Sniff `bytes` as an image for `field` and save it under `folder`.
pub async fn store_image(
    storage: &dyn MediaStorage,
    folder: &str,
    field: &'static str,
    bytes: &[u8],
) -> Result<String, crate::error::AppError> {
    let extension = sniff_image(field, bytes)?;
    let reference = storage.save(folder, extension, bytes).await?;
    tracing::debug!(%reference, size = bytes.len(), "Stored upload");
    Ok(reference)
}

/// Remove a file whose database row is gone or was never written.
///
/// Failures are logged, not returned: the request outcome is already
/// decided by the database write.
pub async fn discard(storage: &dyn MediaStorage, reference: &str) {
    if let Err(e) = storage.delete(reference).await {
        tracing::warn!(%reference, error = %e, "Failed to remove stored file");
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn sniffs_supported_formats() {
        assert_eq!(sniff_image("photo", PNG_HEADER).unwrap(), "png");
        assert_eq!(sniff_image("photo", &[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(), "jpg");
        assert_eq!(sniff_image("photo", b"GIF89a....").unwrap(), "gif");
        assert_eq!(sniff_image("photo", b"RIFF\0\0\0\0WEBPVP8 ").unwrap(), "webp");
    }

    #[test]
    fn rejects_non_images() {
        assert_matches!(
            sniff_image("image", b"plain text, not a picture"),
            Err(CoreError::Validation { field: "image", .. })
        );
        assert_matches!(
            sniff_image("photo", b""),
            Err(CoreError::Validation { field: "photo", .. })
        );
    }

    #[tokio::test]
    async fn save_then_delete_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path(), "/media");

        let reference = storage.save(FOLDER_PETS, "png", PNG_HEADER).await.unwrap();
        assert!(reference.starts_with("/media/pets/"));
        assert!(reference.ends_with(".png"));

        let path = storage.resolve(&reference).unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), PNG_HEADER);

        storage.delete(&reference).await.unwrap();
        assert!(!path.exists());

        // Deleting twice is fine.
        storage.delete(&reference).await.unwrap();
    }

    #[test]
    fn refuses_references_outside_root() {
        let storage = LocalMediaStorage::new("/srv/media", "/media");
        assert_matches!(
            storage.resolve("/media/../etc/passwd"),
            Err(StorageError::ForeignReference(_))
        );
        assert_matches!(
            storage.resolve("/static/pets/a.png"),
            Err(StorageError::ForeignReference(_))
        );
        assert_eq!(
            storage.resolve("/media/pets/a.png").unwrap(),
            PathBuf::from("/srv/media/pets/a.png")
        );
    }
}
