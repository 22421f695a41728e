//! Endpoint payloads for iotframe.
//!
//! These travel inside the `content` of an [`ApiResponse`](crate::ApiResponse)
//! or as request bodies.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seconds from the Unix epoch back to `0001-01-01T00:00:00Z`.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// The timestamp sent when there is no image, `0001-01-01T00:00:00Z`.
pub fn zero_time() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIME_SECS, 0).unwrap_or_default()
}

/// The peer's last image as returned by `GET /iotframe/api/image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Public URL of the stored image, empty if there is none.
    pub url: String,
    /// Upload time, RFC 3339 on the wire. [`zero_time`] if there is no image.
    pub date: DateTime<Utc>,
}

impl ImageInfo {
    /// The answer when the peer is missing or has not uploaded yet.
    pub fn empty() -> Self {
        Self {
            url: String::new(),
            date: zero_time(),
        }
    }

    /// True if this describes no image.
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// Body of `POST /iotframe/api/image/post`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostImageRequest {
    /// MIME type of `data`, e.g. `image/png`.
    pub mime: String,
    /// Raw image bytes, standard base64 on the wire.
    #[serde(serialize_with = "encode_base64", deserialize_with = "decode_base64")]
    pub data: Vec<u8>,
}

fn encode_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

fn decode_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}
