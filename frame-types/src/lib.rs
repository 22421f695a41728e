//! # frame-types
//!
//! Wire format types for the iotframe image relay.
//!
//! This crate provides the types shared by the relay and its clients:
//! - [`DeviceToken`] - Identity issued to each paired device
//! - [`ApiResponse`] - The `{error, content}` envelope every endpoint answers with
//! - [`ImageInfo`], [`PostImageRequest`] - Endpoint payloads
//! - [`ApiError`] - Errors as they appear on the wire
//! - [`paths`] and header names - The HTTP surface

#![warn(missing_docs)]
#![warn(clippy::all)]

mod envelope;
mod error;
mod ids;
mod messages;

pub use envelope::ApiResponse;
pub use error::ApiError;
pub use ids::{DeviceToken, ParseTokenError};
pub use messages::{zero_time, ImageInfo, PostImageRequest};

/// Header carrying the shared secret when requesting a new identity.
pub const KEY_HEADER: &str = "key";

/// Header carrying the issued [`DeviceToken`] on session requests.
pub const SESSION_HEADER: &str = "uuid";

/// Request paths served by the relay.
pub mod paths {
    /// Issue a new device identity (`GET`, shared key).
    pub const UUID: &str = "/iotframe/api/uuid";
    /// Read the peer's last image (`GET`, session).
    pub const IMAGE: &str = "/iotframe/api/image";
    /// Upload an image for the peer (`POST`, session).
    pub const IMAGE_POST: &str = "/iotframe/api/image/post";
    /// Whether the peer has seen our last image (`GET`, session).
    pub const SEEN: &str = "/iotframe/api/seen";
    /// Mark the peer's last image as seen (`POST`, session).
    pub const SEEN_POST: &str = "/iotframe/api/seen/post";
    /// Public prefix under which stored images are served.
    pub const IMAGES: &str = "/images";
}
