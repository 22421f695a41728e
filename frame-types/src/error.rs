//! Error types for iotframe.

use thiserror::Error;

/// Errors as reported in the `error` field of an [`ApiResponse`](crate::ApiResponse).
///
/// The messages are part of the wire format; clients match on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Shared secret missing or wrong on identity issuance
    #[error("Invalid API key supplied")]
    InvalidKey,

    /// Both slots are taken
    #[error("No slots left")]
    NoSlots,

    /// Image could not be stored
    #[error("Image could not be uploaded")]
    ImageUpload,

    /// MIME type outside the allow-list
    #[error("Image mime type not recognized")]
    MediaNotRecognized,

    /// Token is not registered
    #[error("Unknown device")]
    UnknownDevice,

    /// Request body could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
