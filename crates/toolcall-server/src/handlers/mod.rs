//! HTTP route handlers.

pub mod inference;
pub mod users;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
