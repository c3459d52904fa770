//! Tool definitions offered to the model during inference.
//!
//! - [`Tool`] — Trait describing a callable tool
//! - [`MakeRequestTool`] — Built-in tool that describes an HTTP request
//!
//! Tools here are declarative: the service never executes them, it only
//! hands their schema to the model and returns the arguments it produced.
//!
//! ```rust
//! use toolcall_tools::{MakeRequestTool, Tool};
//!
//! let tool = MakeRequestTool;
//! let choice = tool.forced_choice();
//! assert_eq!(choice.function_name(), tool.name());
//! ```

mod make_request;

pub use make_request::MakeRequestTool;

pub use toolcall_core::{ToolChoice, ToolSchema};

/// Trait for tools that can be offered to an LLM.
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a description of what this tool does.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for this tool's parameters.
    fn parameters(&self) -> serde_json::Value;

    /// Generates the schema for this tool.
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }

    /// Builds a tool choice that forces the model to call this tool.
    fn forced_choice(&self) -> ToolChoice {
        ToolChoice::function(self.name())
    }
}
