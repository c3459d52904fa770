//! Inference plumbing for forced tool calls.
//!
//! - [`InferenceRequest`] — Tools, forced tool choice, messages and sampling params
//! - [`InferenceBinding`] — Seam over the hosted model (`run(model, request)`)
//! - [`WorkersAiClient`] — Cloudflare Workers AI implementation of the binding
//! - [`InferenceResult`] — Tagged union decoded from the provider output
//! - [`Persona`] — Selects the system prompt
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use toolcall_llm::{InferenceBinding, InferenceRequest, Persona, WorkersAiClient};
//!
//! let client = WorkersAiClient::new(&account_id, &api_token);
//! let request = InferenceRequest::forced_make_request(Persona::Qa, "/users/:id", 0.12);
//! let result = client.run("@hf/nousresearch/hermes-2-pro-mistral-7b", &request).await?;
//! let args = result.tool_args()?;
//! ```

mod client;
mod prompts;
mod request;
mod result;

pub use client::{InferenceBinding, InferenceError, WorkersAiClient, DEFAULT_API_BASE};
pub use prompts::{system_prompt, Persona, UnknownPersona};
pub use request::InferenceRequest;
pub use result::{InferenceResult, InferenceStream, ValidationError};
pub use toolcall_core::{Message, MessageRole, ToolCall, ToolChoice, ToolSchema};
