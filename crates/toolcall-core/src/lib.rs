//! Core domain types shared across the toolcall workspace.
//!
//! - [`Message`] and [`MessageRole`] — Chat messages sent to the model
//! - [`ToolSchema`] — Description of a callable tool
//! - [`ToolChoice`] — Forces the model to call one named tool
//! - [`ToolCall`] — A tool invocation emitted by the model
//!
//! # Example
//!
//! ```rust
//! use toolcall_core::{Message, ToolChoice};
//!
//! let system = Message::system("You are a QA engineer.");
//! let choice = ToolChoice::function("make_request");
//!
//! assert_eq!(choice.function_name(), "make_request");
//! assert_eq!(system.content, "You are a QA engineer.");
//! ```

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation.
///
/// Requests only ever carry the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions that frame the model's behavior.
    System,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Creates a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }
}

// ============================================================================
// Tool Types
// ============================================================================

/// JSON schema describing a tool for LLM function calling.
///
/// Serialized flat (`name`, `description`, `parameters`), which is the shape
/// Workers AI accepts for its function-calling models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique name of the tool (e.g., "make_request").
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// Name of the function a [`ToolChoice`] points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionName {
    pub name: String,
}

/// Restricts the model to a specific tool instead of free-form output.
///
/// Serializes as `{"type": "function", "function": {"name": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolChoice {
    Function { function: FunctionName },
}

impl ToolChoice {
    /// Forces a call to the tool with the given name.
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function { function: FunctionName { name: name.into() } }
    }

    /// Returns the name of the forced tool.
    pub fn function_name(&self) -> &str {
        match self {
            Self::Function { function } => &function.name,
        }
    }
}

/// A tool call requested by the LLM.
///
/// `arguments` stays an untyped JSON value: the model is free to return
/// anything here, so callers must check its shape before trusting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool the model invoked.
    pub name: String,
    /// Raw arguments as emitted by the model.
    pub arguments: serde_json::Value,
}
