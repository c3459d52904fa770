//! Cloudflare Workers AI client.
//!
//! Talks to the REST endpoint `POST {api_base}/accounts/{account}/ai/run/{model}`
//! and decodes its `{result, success, errors}` envelope into an
//! [`InferenceResult`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::request::InferenceRequest;
use crate::result::InferenceResult;

/// Default Cloudflare API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from talking to the inference provider.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The HTTP request could not be sent or its body not read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered but flagged the call as failed.
    #[error("Provider reported failure: {0}")]
    Provider(String),

    /// The provider response could not be decoded.
    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

/// Handle used to submit prompts to a hosted model.
#[async_trait]
pub trait InferenceBinding: Send + Sync {
    /// Runs `model` with the given request and returns the decoded result.
    async fn run(&self, model: &str, request: &InferenceRequest) -> Result<InferenceResult, InferenceError>;
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    result: Option<serde_json::Value>,
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

fn describe_errors(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| match e.code {
            Some(code) => format!("{} ({})", e.message, code),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/event-stream"))
}

/// Client for the Workers AI REST API.
pub struct WorkersAiClient {
    client: Client,
    api_base: String,
    account_id: String,
    api_token: String,
    timeout: Duration,
}

impl WorkersAiClient {
    /// Creates a client for the given account, authenticated with an API token.
    pub fn new(account_id: &str, api_token: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            account_id: account_id.to_string(),
            api_token: api_token.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Points the client at a different API base (e.g. a gateway or a test server).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn run_url(&self, model: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.api_base,
            self.account_id,
            model.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl InferenceBinding for WorkersAiClient {
    async fn run(&self, model: &str, request: &InferenceRequest) -> Result<InferenceResult, InferenceError> {
        let start = Instant::now();
        let url = self.run_url(model);
        debug!("Workers AI request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() && is_event_stream(response.headers()) {
            info!("Workers AI: {}ms, streaming response", start.elapsed().as_millis());
            let stream = response.bytes_stream().map(|chunk| {
                chunk
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .map_err(InferenceError::from)
            });
            return Ok(InferenceResult::Stream(Box::pin(stream)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status { status: status.as_u16(), body });
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| InferenceError::Decode(e.to_string()))?;

        if !envelope.success {
            return Err(InferenceError::Provider(describe_errors(&envelope.errors)));
        }

        let output = envelope
            .result
            .ok_or_else(|| InferenceError::Decode("missing result".into()))?;

        let result = InferenceResult::from_output(&output);
        info!(
            "Workers AI: {}ms, result: {}",
            start.elapsed().as_millis(),
            result.kind()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::prompts::Persona;
    use crate::result::ValidationError;

    const MODEL: &str = "@hf/nousresearch/hermes-2-pro-mistral-7b";
    const RUN_PATH: &str = "/accounts/acct/ai/run/@hf/nousresearch/hermes-2-pro-mistral-7b";

    async fn setup() -> (WorkersAiClient, mockito::ServerGuard) {
        let server = mockito::Server::new_async().await;
        let client = WorkersAiClient::new("acct", "token").with_api_base(&server.url());
        (client, server)
    }

    fn request() -> InferenceRequest {
        InferenceRequest::forced_make_request(Persona::Qa, "/users/:id", 0.12)
    }

    #[test]
    fn run_url_keeps_model_path_segments() {
        let client = WorkersAiClient::new("acct", "token").with_api_base("https://example.com/v4/");
        assert_eq!(
            client.run_url(MODEL),
            "https://example.com/v4/accounts/acct/ai/run/@hf/nousresearch/hermes-2-pro-mistral-7b"
        );
    }

    #[tokio::test]
    async fn decodes_tool_call_result() {
        let (client, mut server) = setup().await;

        let mock = server
            .mock("POST", RUN_PATH)
            .match_header("authorization", "Bearer token")
            .match_body(Matcher::PartialJson(json!({
                "tool_choice": { "type": "function", "function": { "name": "make_request" } },
                "temperature": 0.12,
                "prompt": "/users/:id"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "result": {
                        "tool_calls": [{ "name": "make_request", "arguments": { "path": "/users/5", "method": "GET" } }]
                    },
                    "success": true,
                    "errors": [],
                    "messages": []
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = client.run(MODEL, &request()).await.unwrap();
        mock.assert_async().await;

        let args = result.tool_args().unwrap();
        assert_eq!(args, json!({ "path": "/users/5", "method": "GET" }));
    }

    #[tokio::test]
    async fn decodes_text_result() {
        let (client, mut server) = setup().await;

        server
            .mock("POST", RUN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "result": { "response": "Sure!" }, "success": true, "errors": [] }).to_string())
            .create_async()
            .await;

        let result = client.run(MODEL, &request()).await.unwrap();
        assert_eq!(result.tool_args(), Err(ValidationError::UnexpectedText));
    }

    #[tokio::test]
    async fn event_stream_decodes_to_stream() {
        let (client, mut server) = setup().await;

        server
            .mock("POST", RUN_PATH)
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body("data: {\"response\":\"hi\"}\n\ndata: [DONE]\n\n")
            .create_async()
            .await;

        let result = client.run(MODEL, &request()).await.unwrap();
        assert_eq!(result.kind(), "stream");
        assert_eq!(result.tool_args(), Err(ValidationError::UnexpectedStream));
    }

    #[tokio::test]
    async fn unsuccessful_envelope_is_provider_error() {
        let (client, mut server) = setup().await;

        server
            .mock("POST", RUN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "result": null,
                    "success": false,
                    "errors": [{ "code": 5006, "message": "Invalid input" }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client.run(MODEL, &request()).await.unwrap_err();
        match err {
            InferenceError::Provider(msg) => assert_eq!(msg, "Invalid input (5006)"),
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let (client, mut server) = setup().await;

        server
            .mock("POST", RUN_PATH)
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let err = client.run(MODEL, &request()).await.unwrap_err();
        assert!(matches!(err, InferenceError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let (client, mut server) = setup().await;

        server
            .mock("POST", RUN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let err = client.run(MODEL, &request()).await.unwrap_err();
        assert!(matches!(err, InferenceError::Decode(_)));
    }
}
