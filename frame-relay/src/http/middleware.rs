//! Request middleware: session resolution, request logging, timeouts.

use crate::server::FrameRelay;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Extension};
use frame_types::{DeviceToken, SESSION_HEADER};
use std::sync::Arc;
use std::time::Instant;

/// Read the session token from the `Uuid` header.
///
/// Only the exact form the relay issues (lowercase, hyphenated) is accepted.
pub fn session_token(headers: &HeaderMap) -> Option<DeviceToken> {
    let value = headers.get(SESSION_HEADER)?.to_str().ok()?;
    let token: DeviceToken = value.parse().ok()?;
    (token.to_string() == value).then_some(token)
}

/// Admit only callers whose token is registered.
///
/// On success the resolved [`DeviceToken`] is stored in the request
/// extensions for the handler. Anything else is answered with 403 before
/// the handler runs. Never mutates the registry.
pub async fn require_session(
    Extension(relay): Extension<Arc<FrameRelay>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(req.headers()) else {
        tracing::debug!("No session token on {}", req.uri().path());
        return unauthorized();
    };

    if !relay.registry().contains(&token).await {
        tracing::debug!("Unknown session {:?} on {}", token, req.uri().path());
        return unauthorized();
    }

    req.extensions_mut().insert(token);
    next.run(req).await
}

fn unauthorized() -> Response {
    (StatusCode::FORBIDDEN, "unauthorized").into_response()
}

/// Log method, path, status and latency of every request.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let begin = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        took_ms = begin.elapsed().as_millis() as u64,
        "call"
    );
    response
}

/// Turn a failed request deadline into 408.
pub async fn handle_timeout(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string())
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}
