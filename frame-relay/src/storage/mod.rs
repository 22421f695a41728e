//! Media storage for iotframe-relay.
//!
//! Persists uploaded image bytes and hands back the public reference the
//! peer will fetch them from. Owns no pairing state.

mod fs;

pub use fs::FsMediaStore;

use crate::error::MediaResult;
use async_trait::async_trait;

/// Accepted MIME types and the file extension each is stored under.
pub const MIME_EXTENSIONS: &[(&str, &str)] = &[("image/jpeg", "jpg"), ("image/png", "png")];

/// Resolve the storage extension for an allowed MIME type.
pub fn ext_for_mime(mime: &str) -> Option<&'static str> {
    MIME_EXTENSIONS
        .iter()
        .find(|(allowed, _)| *allowed == mime)
        .map(|(_, ext)| *ext)
}

/// Resolve the MIME type to serve a stored file with.
pub fn mime_for_path(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    MIME_EXTENSIONS
        .iter()
        .find(|(_, known)| known.eq_ignore_ascii_case(ext))
        .map(|(mime, _)| *mime)
        .unwrap_or("application/octet-stream")
}

/// Trait for media storage backends.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store image bytes of the given MIME type.
    ///
    /// Returns the public reference (root prefix plus relative path).
    /// Fails with `UnsupportedMediaType` for MIME types outside
    /// [`MIME_EXTENSIONS`] and with `Io` when the write fails.
    async fn save(&self, mime: &str, bytes: &[u8]) -> MediaResult<String>;
}
