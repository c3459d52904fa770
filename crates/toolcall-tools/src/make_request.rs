//! The `make_request` tool: the model describes an HTTP request to send.

use serde_json::json;

use crate::Tool;

/// Asks the model for a concrete HTTP request against a route.
///
/// The model fills in route params, picks a method and optionally adds a
/// body, query params and headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestTool;

impl MakeRequestTool {
    pub const NAME: &'static str = "make_request";
}

fn key_value_list(description: &str) -> serde_json::Value {
    json!({
        "type": "array",
        "description": description,
        "items": {
            "type": "object",
            "properties": {
                "key": { "type": "string" },
                "value": { "type": "string" }
            },
            "required": ["key", "value"]
        }
    })
}

impl Tool for MakeRequestTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Generates an HTTP request to send to an API route. \
         Fill in every route parameter in the path with a concrete value."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The request path with route params replaced, e.g. /users/5"
                },
                "method": {
                    "type": "string",
                    "description": "The HTTP method, e.g. GET or POST"
                },
                "queryParams": key_value_list("Query parameters to append to the path"),
                "headers": key_value_list("Request headers"),
                "body": {
                    "type": "string",
                    "description": "The request body, JSON-encoded if the route expects JSON"
                }
            },
            "required": ["path", "method"]
        })
    }
}
