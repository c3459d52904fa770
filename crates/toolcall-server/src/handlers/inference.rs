//! Root endpoint: asks the model for a request against the sample route.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::AppError;
use crate::services::inference::{generate_request, ROUTE_PROMPT};
use crate::state::ServerState;

/// Returns the `make_request` arguments the model produced.
pub async fn generate(State(state): State<Arc<ServerState>>) -> Result<Json<Value>, AppError> {
    let args = generate_request(&state, ROUTE_PROMPT).await?;
    Ok(Json(args))
}
