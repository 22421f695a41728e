//! Health check endpoint.

use crate::server::FrameRelay;
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health status response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Number of registered participants.
    pub participants: usize,
    /// Maximum number of participants.
    pub capacity: usize,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Health check handler.
pub async fn health_handler(Extension(relay): Extension<Arc<FrameRelay>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        participants: relay.registry().len().await,
        capacity: relay.registry().capacity(),
        uptime_seconds: relay.uptime_secs(),
    })
}
