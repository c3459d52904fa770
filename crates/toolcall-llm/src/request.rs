//! Request body for a forced tool-call inference.

use serde::Serialize;
use toolcall_core::{Message, ToolChoice, ToolSchema};
use toolcall_tools::{MakeRequestTool, Tool};

use crate::prompts::{system_prompt, Persona};

/// Inputs sent to the model binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceRequest {
    pub tools: Vec<ToolSchema>,
    pub tool_choice: ToolChoice,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub prompt: String,
}

impl InferenceRequest {
    /// Builds a request that forces a `make_request` call for the given prompt.
    ///
    /// The message list holds only the system prompt; `user_prompt` travels
    /// in the separate `prompt` field. Function-calling models on Workers AI
    /// read `messages` and ignore `prompt`, so the model never actually sees
    /// the route it is asked about. This mirrors the deployed behavior and is
    /// kept until a user message is confirmed to work with forced tool choice.
    pub fn forced_make_request(persona: Persona, user_prompt: &str, temperature: f64) -> Self {
        let tool = MakeRequestTool;
        Self {
            tools: vec![tool.schema()],
            tool_choice: tool.forced_choice(),
            messages: vec![Message::system(system_prompt(persona))],
            temperature,
            prompt: user_prompt.to_string(),
        }
    }
}
