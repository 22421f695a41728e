//! Filesystem storage backend for iotframe-relay.

use super::{ext_for_mime, MediaStore};
use crate::error::{MediaError, MediaResult};
use async_trait::async_trait;
use frame_types::paths;
use std::path::{Path, PathBuf};

/// Writes images into a flat directory under random names.
///
/// The directory is append-only from the store's point of view; names are
/// `m-<uuid>.<ext>` so concurrent uploads never collide.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    dir: PathBuf,
    root: String,
}

impl FsMediaStore {
    /// Create a store writing into `dir`, publishing references under `root`.
    pub fn new(dir: impl Into<PathBuf>, root: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            root: root.into(),
        }
    }

    /// Create the images directory if it is missing.
    pub async fn ensure_dir(&self) -> MediaResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Directory images are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn reference_for(&self, name: &str) -> String {
        format!("{}{}/{}", self.root.trim_end_matches('/'), paths::IMAGES, name)
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn save(&self, mime: &str, bytes: &[u8]) -> MediaResult<String> {
        let ext = ext_for_mime(mime).ok_or_else(|| MediaError::UnsupportedMediaType {
            mime: mime.to_string(),
        })?;

        let name = format!("m-{}.{}", uuid::Uuid::new_v4(), ext);
        let path = self.dir.join(&name);
        let tmp = self.dir.join(format!(".{name}.tmp"));

        // Write-then-rename so readers never observe a half-written file.
        if let Err(e) = write_then_rename(&tmp, &path, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            tracing::warn!("Failed to store {}: {}", name, e);
            return Err(MediaError::Io(e));
        }

        tracing::debug!("Stored {} ({} bytes)", name, bytes.len());
        Ok(self.reference_for(&name))
    }
}

async fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(tmp, bytes).await?;
    tokio::fs::rename(tmp, path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FsMediaStore {
        FsMediaStore::new(dir.path(), "https://frame.example.com/")
    }

    #[tokio::test]
    async fn save_writes_bytes_and_returns_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let reference = store.save("image/png", b"png bytes").await.unwrap();

        let prefix = "https://frame.example.com/images/m-";
        assert!(reference.starts_with(prefix), "{reference}");
        assert!(reference.ends_with(".png"));

        let name = reference.rsplit('/').next().unwrap();
        let stored = tokio::fs::read(dir.path().join(name)).await.unwrap();
        assert_eq!(stored, b"png bytes");
    }

    #[tokio::test]
    async fn jpeg_uses_jpg_extension() {
        let dir = tempfile::tempdir().unwrap();
        let reference = store_in(&dir).save("image/jpeg", b"jpeg").await.unwrap();
        assert!(reference.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let a = store.save("image/png", b"a").await.unwrap();
        let b = store.save("image/png", b"a").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn unsupported_mime_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let result = store.save("image/gif", b"GIF89a").await;
        assert!(matches!(
            result,
            Err(MediaError::UnsupportedMediaType { ref mime }) if mime == "image/gif"
        ));

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path().join("absent"), "");

        let result = store.save("image/png", b"x").await;
        assert!(matches!(result, Err(MediaError::Io(_))));
    }

    #[tokio::test]
    async fn ensure_dir_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path().join("nested/images"), "");

        store.ensure_dir().await.unwrap();
        assert!(store.dir().is_dir());
        store.save("image/png", b"x").await.unwrap();
    }

    #[test]
    fn reference_without_trailing_slash() {
        let store = FsMediaStore::new("images", "http://localhost:8080");
        assert_eq!(
            store.reference_for("m-1.png"),
            "http://localhost:8080/images/m-1.png"
        );
    }
}
