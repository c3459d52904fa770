//! Forced tool-call inference: build the request, run it, validate the result.

use serde_json::Value;
use toolcall_llm::{InferenceRequest, InferenceResult};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::state::ServerState;

/// Route the model is asked to write a request for.
pub const ROUTE_PROMPT: &str = "/users/:id";

/// Runs the model with the `make_request` tool forced.
///
/// Provider and transport failures are logged and collapsed into a generic
/// internal error; the caller only ever sees the message.
pub async fn run_inference(state: &ServerState, user_prompt: &str) -> Result<InferenceResult, AppError> {
    let config = &state.config;
    let request = InferenceRequest::forced_make_request(config.persona, user_prompt, config.temperature);

    info!(
        "Running {} (persona: {}, temperature: {})",
        config.model, config.persona, config.temperature
    );

    state
        .binding
        .run(&config.model, &request)
        .await
        .map_err(|e| {
            error!("Inference failed: {}", e);
            AppError::Internal("Inference request failed".into())
        })
}

/// Runs inference and returns the arguments of the forced tool call.
pub async fn generate_request(state: &ServerState, user_prompt: &str) -> Result<Value, AppError> {
    let result = run_inference(state, user_prompt).await?;

    let args = result.tool_args().map_err(|e| {
        warn!("Rejected inference result ({}): {}", result.kind(), e);
        AppError::from(e)
    })?;

    info!(
        "toolArgs {}",
        serde_json::to_string_pretty(&args).unwrap_or_default()
    );
    Ok(args)
}
