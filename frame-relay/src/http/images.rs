//! Static serving of stored images.

use crate::server::FrameRelay;
use crate::storage::mime_for_path;
use axum::extract::Path;
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use std::sync::Arc;

/// `GET /images/:name`: the raw bytes of a stored image.
pub async fn serve_image(
    Extension(relay): Extension<Arc<FrameRelay>>,
    Path(name): Path<String>,
) -> Response {
    if !is_plain_file_name(&name) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = relay.config().server.images_dir.join(&name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(CONTENT_TYPE, mime_for_path(&name))], bytes).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// A single visible path component: no separators, no dot-files, no `..`.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\'])
}
