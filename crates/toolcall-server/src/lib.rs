//! HTTP server that forces a hosted LLM to call the `make_request` tool.
//!
//! Exposes the router so the binary and the integration tests build the
//! exact same app.

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use state::ServerState;

/// Builds the Axum router with tracing and CORS layers.
///
/// `/api/users` is only mounted when a users database is attached.
pub fn build_router(state: Arc<ServerState>) -> Router {
    // CORS wraps every route, the trace layer only the logged ones (not /health).
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let mut logged_routes = Router::new().route("/", get(handlers::inference::generate));
    if state.users_db.is_some() {
        logged_routes = logged_routes.route("/api/users", get(handlers::users::list));
    }

    Router::new()
        .merge(logged_routes.layer(trace_layer))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
