//! HTTP endpoints for iotframe-relay.
//!
//! The routing table is plain data: [`routes`] lists every endpoint with its
//! method and access level, and [`build_router`] turns that list into an
//! axum [`Router`], wrapping session routes in [`middleware::require_session`].

mod handlers;
pub mod health;
mod images;
pub mod middleware;

use crate::server::FrameRelay;
use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::handler::Handler;
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::{Extension, Router};
use frame_types::paths;
use std::sync::Arc;
use tower::ServiceBuilder;

pub use health::HealthStatus;

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone. Handlers do their own checks (e.g. the shared key).
    Public,
    /// Callers presenting a registered token in the `Uuid` header.
    Session,
}

/// One entry of the routing table.
pub struct Route {
    /// HTTP method the route answers to.
    pub method: MethodFilter,
    /// Request path.
    pub path: &'static str,
    /// Required access level.
    pub access: Access,
    handler: MethodRouter,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

impl Route {
    /// Create a route entry.
    pub fn new<H, T>(method: MethodFilter, path: &'static str, access: Access, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self {
            method,
            path,
            access,
            handler: on(method, handler),
        }
    }
}

/// The relay's routing table.
pub fn routes() -> Vec<Route> {
    vec![
        Route::new(MethodFilter::GET, "/health", Access::Public, health::health_handler),
        Route::new(MethodFilter::GET, paths::UUID, Access::Public, handlers::issue_identity),
        Route::new(MethodFilter::GET, paths::IMAGE, Access::Session, handlers::peer_image),
        Route::new(MethodFilter::POST, paths::IMAGE_POST, Access::Session, handlers::post_image),
        Route::new(MethodFilter::GET, paths::SEEN, Access::Session, handlers::own_seen),
        Route::new(MethodFilter::POST, paths::SEEN_POST, Access::Session, handlers::mark_seen),
        Route::new(MethodFilter::GET, "/images/:name", Access::Public, images::serve_image),
    ]
}

/// Build the HTTP router from a routing table.
pub fn build_router(relay: Arc<FrameRelay>, routes: Vec<Route>) -> Router {
    let timeout = relay.config().server.request_timeout();
    let body_limit = relay.config().server.max_body_bytes;

    let mut router = Router::new();
    for route in routes {
        tracing::debug!("Route {:?} {} ({:?})", route.method, route.path, route.access);
        let handler = match route.access {
            Access::Public => route.handler,
            Access::Session => route
                .handler
                .route_layer(axum::middleware::from_fn(middleware::require_session)),
        };
        router = router.route(route.path, handler);
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(middleware::handle_timeout))
                .timeout(timeout),
        )
        .layer(Extension(relay))
}
