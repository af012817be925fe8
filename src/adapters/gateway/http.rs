//! HTTP chat gateway - implementation of ChatGateway for an
//! OpenAI-compatible chat-completions endpoint.
//!
//! One POST per call, bearer auth, no retry: a failed call surfaces its
//! typed error to the caller, and any retry trigger lives with an outer
//! collaborator (e.g. a UI-level "try again" action).
//!
//! # Configuration
//!
//! ```ignore
//! let config = GatewayConfig::new(api_key)
//!     .with_model("google/gemini-2.5-flash")
//!     .with_base_url("https://ai.gateway.lovable.dev/v1");
//!
//! let gateway = HttpChatGateway::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::ports::{
    ChatError, ChatGateway, ChatMessage, ChatReply, ChatRequest, GatewayInfo, ToolCall, ToolSpec,
};

/// Configuration for the HTTP chat gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API key for bearer authentication.
    api_key: Secret<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL of the chat-completions API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "google/gemini-2.5-flash".to_string(),
            base_url: "https://ai.gateway.lovable.dev/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// HTTP implementation of the chat gateway port.
pub struct HttpChatGateway {
    config: GatewayConfig,
    client: Client,
}

impl HttpChatGateway {
    /// Creates a new gateway with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Network`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the wire format.
    fn to_wire_request<'a>(&'a self, request: &'a ChatRequest) -> WireRequest<'a> {
        WireRequest {
            model: &self.config.model,
            messages: &request.messages,
            tools: request.tool.as_ref().map(|t| vec![tool_to_wire(t)]),
            tool_choice: request.tool.as_ref().map(tool_choice_to_wire),
            response_format: request
                .json_response
                .then(|| json!({ "type": "json_object" })),
        }
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let wire = self.to_wire_request(&request);
        debug!(
            trace_id = %request.trace_id,
            model = %self.config.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key()),
            )
            .header("Content-Type", "application/json")
            .json(&wire)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    ChatError::network(format!("connection failed: {e}"))
                } else {
                    ChatError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                trace_id = %request.trace_id,
                status = status.as_u16(),
                "gateway returned non-success status"
            );
            return Err(map_error_status(status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::network(format!("failed to read response body: {e}")))?;
        parse_envelope(&body, &self.config.model)
    }

    fn gateway_info(&self) -> GatewayInfo {
        GatewayInfo::new("http", &self.config.model)
    }
}

/// Maps a non-success status onto the error taxonomy.
///
/// 402 (credits exhausted) and 429 (rate limited) carry their own reason
/// codes so callers can surface them distinctly; everything else is the
/// generic unavailable variant.
fn map_error_status(status: u16, body: &str) -> ChatError {
    match status {
        402 => ChatError::QuotaExhausted,
        429 => ChatError::RateLimited,
        _ => ChatError::unavailable(Some(status), truncate(body, 512)),
    }
}

/// Parses a success envelope into a reply.
fn parse_envelope(body: &str, fallback_model: &str) -> Result<ChatReply, ChatError> {
    let envelope: WireResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::malformed(format!("unparsable completion envelope: {e}")))?;

    let choice = envelope
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::malformed("no choices in completion envelope"))?;

    let tool_call = choice
        .message
        .tool_calls
        .and_then(|calls| calls.into_iter().next())
        .map(|call| ToolCall {
            name: call.function.name,
            arguments: call.function.arguments,
        });

    Ok(ChatReply {
        content: choice.message.content,
        tool_call,
        model: envelope.model.unwrap_or_else(|| fallback_model.to_string()),
    })
}

/// Converts a tool spec to the wire `tools` entry.
fn tool_to_wire(tool: &ToolSpec) -> serde_json::Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters
        }
    })
}

/// Forces the reply through the given tool.
fn tool_choice_to_wire(tool: &ToolSpec) -> serde_json::Value {
    json!({ "type": "function", "function": { "name": tool.name } })
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: Option<String>,
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReplyMessage,
}

#[derive(Debug, Deserialize)]
struct WireReplyMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = GatewayConfig::new("test-key")
            .with_model("google/gemini-2.5-pro")
            .with_base_url("https://custom.gateway.dev/v1")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(config.model, "google/gemini-2.5-pro");
        assert_eq!(config.base_url, "https://custom.gateway.dev/v1");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn completions_url_appends_path() {
        let gateway =
            HttpChatGateway::new(GatewayConfig::new("k").with_base_url("https://g.dev/v1"))
                .unwrap();
        assert_eq!(gateway.completions_url(), "https://g.dev/v1/chat/completions");
    }

    #[test]
    fn wire_request_omits_absent_fields() {
        let gateway = HttpChatGateway::new(GatewayConfig::new("k")).unwrap();
        let request = ChatRequest::new("t").with_message(ChatMessage::user("hi"));

        let wire = serde_json::to_value(gateway.to_wire_request(&request)).unwrap();
        assert_eq!(wire["model"], "google/gemini-2.5-flash");
        assert!(wire.get("tools").is_none());
        assert!(wire.get("tool_choice").is_none());
        assert!(wire.get("response_format").is_none());
    }

    #[test]
    fn wire_request_forces_tool_choice() {
        let gateway = HttpChatGateway::new(GatewayConfig::new("k")).unwrap();
        let request = ChatRequest::new("t")
            .with_message(ChatMessage::user("hi"))
            .with_tool(ToolSpec::new("respond_to_user", "reply", json!({"type": "object"})));

        let wire = serde_json::to_value(gateway.to_wire_request(&request)).unwrap();
        assert_eq!(wire["tools"][0]["type"], "function");
        assert_eq!(wire["tools"][0]["function"]["name"], "respond_to_user");
        assert_eq!(wire["tool_choice"]["function"]["name"], "respond_to_user");
    }

    #[test]
    fn wire_request_sets_json_response_format() {
        let gateway = HttpChatGateway::new(GatewayConfig::new("k")).unwrap();
        let request = ChatRequest::new("t")
            .with_message(ChatMessage::user("hi"))
            .with_json_response();

        let wire = serde_json::to_value(gateway.to_wire_request(&request)).unwrap();
        assert_eq!(wire["response_format"]["type"], "json_object");
    }

    #[test]
    fn status_402_maps_to_quota_exhausted() {
        assert!(matches!(
            map_error_status(402, "credits exhausted"),
            ChatError::QuotaExhausted
        ));
    }

    #[test]
    fn status_429_maps_to_rate_limited() {
        assert!(matches!(map_error_status(429, "slow down"), ChatError::RateLimited));
    }

    #[test]
    fn other_statuses_map_to_unavailable() {
        for status in [400, 401, 500, 503] {
            match map_error_status(status, "boom") {
                ChatError::Unavailable { status: Some(s), .. } => assert_eq!(s, status),
                other => panic!("unexpected error for {status}: {other:?}"),
            }
        }
    }

    #[test]
    fn parse_envelope_extracts_tool_call() {
        let body = r#"{
            "model": "google/gemini-2.5-flash",
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "function": {
                            "name": "respond_to_user",
                            "arguments": "{\"response\":\"hi\",\"needsMoreInfo\":false}"
                        }
                    }]
                }
            }]
        }"#;

        let reply = parse_envelope(body, "fallback").unwrap();
        assert!(reply.content.is_none());
        let call = reply.tool_call.unwrap();
        assert_eq!(call.name, "respond_to_user");
        assert!(call.arguments.contains("needsMoreInfo"));
        assert_eq!(reply.model, "google/gemini-2.5-flash");
    }

    #[test]
    fn parse_envelope_extracts_text_content() {
        let body = r#"{"choices":[{"message":{"content":"{\"ingredients\":[]}"}}]}"#;
        let reply = parse_envelope(body, "fallback").unwrap();
        assert_eq!(reply.content.as_deref(), Some("{\"ingredients\":[]}"));
        assert!(reply.tool_call.is_none());
        assert_eq!(reply.model, "fallback");
    }

    #[test]
    fn parse_envelope_rejects_garbage() {
        assert!(matches!(
            parse_envelope("not json", "m"),
            Err(ChatError::MalformedResponse(_))
        ));
    }

    #[test]
    fn parse_envelope_rejects_empty_choices() {
        assert!(matches!(
            parse_envelope(r#"{"choices":[]}"#, "m"),
            Err(ChatError::MalformedResponse(_))
        ));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 512), "short");
        let truncated = truncate(&"é".repeat(600), 512);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 515);
    }
}
