//! Main FrameRelay server coordination.
//!
//! FrameRelay owns the configuration, the participant registry and the media
//! store, and is shared by every request handler.

use crate::config::Config;
use crate::error::Result;
use crate::registry::Registry;
use crate::storage::{FsMediaStore, MediaStore};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Main relay server.
pub struct FrameRelay {
    config: Config,
    registry: Registry,
    media: Arc<dyn MediaStore>,
    started_at: Instant,
}

impl std::fmt::Debug for FrameRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRelay")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl FrameRelay {
    /// Create a new FrameRelay with the given config and media store.
    pub fn new(config: Config, media: Arc<dyn MediaStore>) -> Self {
        Self {
            config,
            registry: Registry::new(),
            media,
            started_at: Instant::now(),
        }
    }

    /// Load the configuration at `path` and prepare the image directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the image
    /// directory cannot be created.
    pub async fn open(path: &Path) -> Result<Self> {
        let config = Config::from_file(path)?;
        let media = FsMediaStore::new(&config.server.images_dir, config.root.clone());
        media.ensure_dir().await?;
        tracing::info!("Storing images in {}", media.dir().display());

        Ok(Self::new(config, Arc::new(media)))
    }

    /// Get the relay configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the participant registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get the media store.
    pub fn media(&self) -> &dyn MediaStore {
        self.media.as_ref()
    }

    /// Check a presented shared secret against the configured key.
    ///
    /// A missing or empty key never matches.
    pub fn key_matches(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(key) if !key.is_empty() => key == self.config.key,
            _ => false,
        }
    }

    /// Seconds since the relay was created.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;
    use std::io::Write;

    fn test_relay() -> FrameRelay {
        let config = Config {
            key: "s3cret".into(),
            ..Config::default()
        };
        FrameRelay::new(config, Arc::new(FsMediaStore::new("images", "")))
    }

    #[test]
    fn key_must_match_exactly() {
        let relay = test_relay();
        assert!(relay.key_matches(Some("s3cret")));
        assert!(!relay.key_matches(Some("S3CRET")));
        assert!(!relay.key_matches(Some("")));
        assert!(!relay.key_matches(None));
    }

    #[tokio::test]
    async fn starts_with_empty_registry() {
        let relay = test_relay();
        assert!(relay.registry().is_empty().await);
        assert_eq!(relay.registry().capacity(), 2);
    }

    #[tokio::test]
    async fn open_loads_config_and_creates_image_dir() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("store").join("images");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "root = \"https://frame.example.com\"\nkey = \"k\"\n\n[server]\nimages_dir = {:?}",
            images.display().to_string()
        )
        .unwrap();

        let relay = FrameRelay::open(file.path()).await.unwrap();
        assert!(images.is_dir());
        assert_eq!(relay.config().root, "https://frame.example.com");
    }

    #[tokio::test]
    async fn open_reports_config_errors() {
        let err = FrameRelay::open(Path::new("/nonexistent/iotframe.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Config(_)));
    }
}
