//! Decoded provider output and the checks a forced tool call must pass.

use std::fmt;
use std::pin::Pin;

use futures::Stream;
use serde_json::Value;
use thiserror::Error;
use toolcall_core::ToolCall;

use crate::client::InferenceError;

/// Raw text chunks of a streamed response.
pub type InferenceStream = Pin<Box<dyn Stream<Item = Result<String, InferenceError>> + Send>>;

/// What the model returned, decoded at the provider boundary.
pub enum InferenceResult {
    /// The provider answered with a server-sent event stream.
    Stream(InferenceStream),
    /// The output carried free text in `response`.
    Text { response: String },
    /// The output carried no text; holds whatever tool calls were present.
    ToolCalls(Vec<ToolCall>),
}

/// Ways a result can fail to be a usable forced tool call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unexpected inference result (stream)")]
    UnexpectedStream,

    #[error("Unexpected inference result (text)")]
    UnexpectedText,

    #[error("Invalid tool args")]
    InvalidToolArgs,
}

impl InferenceResult {
    /// Decodes a text-generation output object.
    ///
    /// Any non-null `response` wins over tool calls. A missing or non-array
    /// `tool_calls` decodes to an empty list; entries keep their `arguments`
    /// verbatim (null when absent) so that shape checks happen in
    /// [`InferenceResult::tool_args`].
    pub fn from_output(output: &Value) -> Self {
        if let Some(response) = output.get("response").filter(|v| !v.is_null()) {
            let response = match response {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Self::Text { response };
        }

        let calls = output
            .get("tool_calls")
            .and_then(Value::as_array)
            .map(|calls| calls.iter().map(decode_tool_call).collect())
            .unwrap_or_default();

        Self::ToolCalls(calls)
    }

    /// Short label of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stream(_) => "stream",
            Self::Text { .. } => "text",
            Self::ToolCalls(_) => "tool_calls",
        }
    }

    /// Extracts the arguments of the first tool call.
    ///
    /// Fails on streams, on text responses, and when the first call is
    /// missing or its arguments are null or a primitive. Objects and arrays
    /// are both returned as-is.
    pub fn tool_args(&self) -> Result<Value, ValidationError> {
        let calls = match self {
            Self::Stream(_) => return Err(ValidationError::UnexpectedStream),
            Self::Text { .. } => return Err(ValidationError::UnexpectedText),
            Self::ToolCalls(calls) => calls,
        };

        match calls.first().map(|c| &c.arguments) {
            Some(args @ (Value::Object(_) | Value::Array(_))) => Ok(args.clone()),
            _ => Err(ValidationError::InvalidToolArgs),
        }
    }
}

fn decode_tool_call(entry: &Value) -> ToolCall {
    ToolCall {
        name: entry
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        arguments: entry.get("arguments").cloned().unwrap_or(Value::Null),
    }
}

impl fmt::Debug for InferenceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Text { response } => f.debug_struct("Text").field("response", response).finish(),
            Self::ToolCalls(calls) => f.debug_tuple("ToolCalls").field(calls).finish(),
        }
    }
}
