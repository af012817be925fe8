//! Chat Gateway Port - interface to the chat-completion reasoning backend.
//!
//! This port abstracts the remote reasoning service the decision and
//! ingredient operations call out to, keeping the domain free of HTTP
//! concerns and letting tests substitute a configurable mock.
//!
//! # Design
//!
//! - One outbound request per operation, no retry at this layer
//! - Structured output via a forced function/tool schema, or a JSON-object
//!   response format for vision requests
//! - Error variants map the gateway's status codes onto the failure
//!   taxonomy the callers surface to users (quota exhausted and rate
//!   limited carry their own reason codes)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for chat-completion gateway interactions.
///
/// Implementations connect to an external chat-completion API and translate
/// between the wire format and these value types.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one completion request and return the reply.
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ChatError>;

    /// Get gateway information (name, model).
    fn gateway_info(&self) -> GatewayInfo;
}

/// Request for one chat completion.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Ordered messages (system + alternating user/assistant turns).
    pub messages: Vec<ChatMessage>,
    /// When present, the gateway must answer by calling this tool.
    pub tool: Option<ToolSpec>,
    /// Request a JSON-object response body instead of free text.
    pub json_response: bool,
    /// Correlation id for tracing.
    pub trace_id: String,
}

impl ChatRequest {
    /// Creates an empty request with the given trace id.
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            tool: None,
            json_response: false,
            trace_id: trace_id.into(),
        }
    }

    /// Appends a message.
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Forces the reply through the given tool schema.
    pub fn with_tool(mut self, tool: ToolSpec) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Requests a JSON-object response format.
    pub fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }
}

/// A message in the conversation sent to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this message.
    pub role: ChatRole,
    /// Message content (plain text or multi-part).
    pub content: MessageContent,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Creates a user message carrying an inline image next to a text prompt.
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                    },
                },
            ]),
        }
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instructions (guides model behavior).
    System,
    /// User input.
    User,
    /// Assistant (model) response.
    Assistant,
}

/// Message content: plain text or multi-part (text + inline images).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// Multi-part content for vision requests.
    Parts(Vec<ContentPart>),
}

/// One part of a multi-part message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text part.
    Text { text: String },
    /// Inline image part (data URL or remote URL).
    ImageUrl { image_url: ImageUrl },
}

/// Image reference inside a content part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// A function/tool schema the gateway's reply must conform to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name (e.g. "respond_to_user").
    pub name: String,
    /// Human-readable description for the model.
    pub description: String,
    /// JSON Schema for the arguments.
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    /// Creates a new tool spec.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Reply from one chat completion.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Free-text content, if the model answered with text.
    pub content: Option<String>,
    /// Tool invocation, if the model answered through a tool schema.
    pub tool_call: Option<ToolCall>,
    /// Model that generated the reply.
    pub model: String,
}

impl ChatReply {
    /// Returns the tool call arguments, if present.
    pub fn tool_arguments(&self) -> Option<&str> {
        self.tool_call.as_ref().map(|c| c.arguments.as_str())
    }
}

/// A tool invocation returned by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Name of the invoked tool.
    pub name: String,
    /// Raw JSON argument string (validated by the caller).
    pub arguments: String,
}

/// Gateway information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayInfo {
    /// Gateway name (e.g. "lovable", "mock").
    pub name: String,
    /// Model identifier sent with requests.
    pub model: String,
}

impl GatewayInfo {
    /// Creates new gateway info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Chat gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The account's AI credits are exhausted (HTTP 402).
    #[error("AI credits exhausted; add more credits to continue")]
    QuotaExhausted,

    /// Rate limited by the gateway (HTTP 429).
    #[error("rate limit exceeded; please try again in a moment")]
    RateLimited,

    /// Gateway replied with an unexpected non-success status.
    #[error("gateway unavailable (status {status:?}): {message}")]
    Unavailable {
        /// HTTP status, when one was received.
        status: Option<u16>,
        /// Error details.
        message: String,
    },

    /// Request timed out.
    #[error("gateway request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Gateway replied success but the structured payload is absent or unparsable.
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    /// Creates an unavailable error for a non-success status.
    pub fn unavailable(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Stable reason code for API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            ChatError::QuotaExhausted => "QUOTA_EXHAUSTED",
            ChatError::RateLimited => "RATE_LIMITED",
            ChatError::Unavailable { .. } => "UPSTREAM_UNAVAILABLE",
            ChatError::Timeout { .. } => "UPSTREAM_TIMEOUT",
            ChatError::Network(_) => "UPSTREAM_UNAVAILABLE",
            ChatError::MalformedResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
        }
    }

    /// Returns true for failures of the backend or the path to it, as
    /// opposed to a well-received but unusable reply.
    pub fn is_upstream_unavailable(&self) -> bool {
        !matches!(self, ChatError::MalformedResponse(_))
    }
}
