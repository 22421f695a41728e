//! API handlers.
//!
//! Each handler calls exactly one registry operation (plus the media store
//! for uploads) and wraps the outcome in an [`ApiResponse`]. Logical errors
//! are reported in the envelope with status 200.

use crate::registry::Image;
use crate::server::FrameRelay;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use frame_types::{ApiError, ApiResponse, DeviceToken, ImageInfo, PostImageRequest, KEY_HEADER};
use std::sync::Arc;

fn respond<T, E: Into<ApiError>>(result: Result<T, E>) -> Json<ApiResponse<T>> {
    Json(match result {
        Ok(content) => ApiResponse::ok(content),
        Err(e) => ApiResponse::err(e),
    })
}

/// `GET /iotframe/api/uuid`: issue an identity to a caller holding the shared key.
pub async fn issue_identity(
    Extension(relay): Extension<Arc<FrameRelay>>,
    headers: HeaderMap,
) -> Json<ApiResponse<DeviceToken>> {
    let key = headers.get(KEY_HEADER).and_then(|v| v.to_str().ok());
    if !relay.key_matches(key) {
        tracing::debug!("Identity request with invalid key");
        return respond(Err(ApiError::InvalidKey));
    }

    respond(relay.registry().issue_identity().await)
}

/// `GET /iotframe/api/image`: the peer's last image, empty if there is none.
pub async fn peer_image(
    Extension(relay): Extension<Arc<FrameRelay>>,
    Extension(token): Extension<DeviceToken>,
) -> Json<ApiResponse<ImageInfo>> {
    let image = relay.registry().peer_last_image(&token).await;
    respond(image.map(|image| image.as_ref().map_or_else(ImageInfo::empty, ImageInfo::from)))
}

/// `POST /iotframe/api/image/post`: store an image and hand it to the peer.
pub async fn post_image(
    Extension(relay): Extension<Arc<FrameRelay>>,
    Extension(token): Extension<DeviceToken>,
    body: Bytes,
) -> Json<ApiResponse<bool>> {
    let req: PostImageRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::debug!("Malformed upload from {:?}: {}", token, e);
            return respond(Err(ApiError::InvalidRequest(e.to_string())));
        }
    };

    // Disk first, registry lock second.
    let reference = match relay.media().save(&req.mime, &req.data).await {
        Ok(reference) => reference,
        Err(e) => {
            tracing::warn!("Upload from {:?} failed: {}", token, e);
            return respond(Err(e));
        }
    };

    respond(
        relay
            .registry()
            .record_image(&token, Image::new(reference))
            .await
            .map(|()| true),
    )
}

/// `GET /iotframe/api/seen`: whether the peer has seen the caller's last image.
pub async fn own_seen(
    Extension(relay): Extension<Arc<FrameRelay>>,
    Extension(token): Extension<DeviceToken>,
) -> Json<ApiResponse<bool>> {
    respond(relay.registry().own_seen_status(&token).await)
}

/// `POST /iotframe/api/seen/post`: acknowledge the other side's last image.
pub async fn mark_seen(
    Extension(relay): Extension<Arc<FrameRelay>>,
    Extension(token): Extension<DeviceToken>,
) -> Json<ApiResponse<bool>> {
    respond(
        relay
            .registry()
            .mark_all_others_seen(&token)
            .await
            .map(|()| true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::{MediaError, MediaResult};
    use crate::storage::MediaStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl MediaStore for BrokenStore {
        async fn save(&self, _mime: &str, _bytes: &[u8]) -> MediaResult<String> {
            Err(MediaError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }
    }

    #[tokio::test]
    async fn storage_failure_is_image_upload_error() {
        let relay = Arc::new(FrameRelay::new(Config::default(), Arc::new(BrokenStore)));
        let a = relay.registry().issue_identity().await.unwrap();
        let b = relay.registry().issue_identity().await.unwrap();

        let body = Bytes::from_static(br#"{"mime":"image/png","data":"AAAA"}"#);
        let Json(resp) = post_image(Extension(relay.clone()), Extension(a), body).await;

        assert_eq!(resp.error.as_deref(), Some("Image could not be uploaded"));
        assert_eq!(relay.registry().peer_last_image(&b).await.unwrap(), None);
    }

    #[tokio::test]
    async fn handlers_report_unknown_identity() {
        let relay = Arc::new(FrameRelay::new(Config::default(), Arc::new(BrokenStore)));
        let stranger = DeviceToken::random();

        let Json(resp) = own_seen(Extension(relay.clone()), Extension(stranger)).await;
        assert_eq!(resp.error.as_deref(), Some("Unknown device"));

        let Json(resp) = mark_seen(Extension(relay.clone()), Extension(stranger)).await;
        assert_eq!(resp.error.as_deref(), Some("Unknown device"));

        let Json(resp) = peer_image(Extension(relay), Extension(stranger)).await;
        assert_eq!(resp.error.as_deref(), Some("Unknown device"));
        assert_eq!(resp.content, None);
    }

    #[tokio::test]
    async fn identity_issued_with_matching_key() {
        let relay = Arc::new(FrameRelay::new(Config::default(), Arc::new(BrokenStore)));
        let mut headers = HeaderMap::new();
        headers.insert(KEY_HEADER, relay.config().key.parse().unwrap());

        let Json(resp) = issue_identity(Extension(relay.clone()), headers).await;
        let token = resp.content.unwrap();
        assert!(relay.registry().contains(&token).await);
    }
}
