//! Error types for iotframe-relay.

use frame_types::{ApiError, DeviceToken};

/// Main error type for iotframe-relay operations.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Registry error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Media storage error.
    #[error("media error: {0}")]
    Media(#[from] MediaError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Participant registry errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Every slot is taken.
    #[error("registry full ({capacity} participants)")]
    CapacityExceeded {
        /// Registry capacity.
        capacity: usize,
    },

    /// Token was never issued by this registry.
    #[error("unknown identity: {token}")]
    UnknownIdentity {
        /// The unrecognised token.
        token: DeviceToken,
    },
}

/// Media store errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// MIME type outside the allow-list.
    #[error("unsupported media type: {mime}")]
    UnsupportedMediaType {
        /// The rejected MIME type.
        mime: String,
    },

    /// Writing the image failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::CapacityExceeded { .. } => ApiError::NoSlots,
            RegistryError::UnknownIdentity { .. } => ApiError::UnknownDevice,
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::UnsupportedMediaType { .. } => ApiError::MediaNotRecognized,
            MediaError::Io(_) => ApiError::ImageUpload,
        }
    }
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Result type alias for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Result type alias for media operations.
pub type MediaResult<T> = std::result::Result<T, MediaError>;
