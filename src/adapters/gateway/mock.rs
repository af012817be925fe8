//! Mock chat gateway for testing.
//!
//! Configurable implementation of the ChatGateway port, letting tests run
//! without calling a real reasoning API: scripted replies consumed in
//! order, error injection, and call recording for verification.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockChatGateway::new()
//!     .with_tool_reply("respond_to_user", r#"{"response":"hi","needsMoreInfo":false}"#);
//!
//! let reply = gateway.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    ChatError, ChatGateway, ChatReply, ChatRequest, GatewayInfo, ToolCall,
};

/// Mock gateway with scripted replies.
#[derive(Clone, Default)]
pub struct MockChatGateway {
    /// Scripted replies, consumed in order.
    replies: Arc<Mutex<VecDeque<Result<ChatReply, ChatError>>>>,
    /// Recorded requests for verification.
    calls: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatGateway {
    /// Creates a mock with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a reply answering through a tool call.
    pub fn with_tool_reply(
        self,
        tool_name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        self.push(Ok(ChatReply {
            content: None,
            tool_call: Some(ToolCall {
                name: tool_name.into(),
                arguments: arguments.into(),
            }),
            model: "mock-model-1".to_string(),
        }))
    }

    /// Scripts a plain text reply.
    pub fn with_text_reply(self, content: impl Into<String>) -> Self {
        self.push(Ok(ChatReply {
            content: Some(content.into()),
            tool_call: None,
            model: "mock-model-1".to_string(),
        }))
    }

    /// Scripts an error.
    pub fn with_error(self, error: ChatError) -> Self {
        self.push(Err(error))
    }

    /// Returns all recorded requests.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }

    fn push(self, reply: Result<ChatReply, ChatError>) -> Self {
        self.replies
            .lock()
            .expect("mock lock poisoned")
            .push_back(reply);
        self
    }
}

#[async_trait]
impl ChatGateway for MockChatGateway {
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        self.replies
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(ChatError::unavailable(
                    None,
                    "mock gateway has no scripted reply",
                ))
            })
    }

    fn gateway_info(&self) -> GatewayInfo {
        GatewayInfo::new("mock", "mock-model-1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ChatMessage;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let gateway = MockChatGateway::new()
            .with_text_reply("first")
            .with_text_reply("second");

        let request = ChatRequest::new("t").with_message(ChatMessage::user("hi"));
        let first = gateway.complete(request.clone()).await.unwrap();
        let second = gateway.complete(request).await.unwrap();

        assert_eq!(first.content.as_deref(), Some("first"));
        assert_eq!(second.content.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn exhausted_script_reports_unavailable() {
        let gateway = MockChatGateway::new();
        let request = ChatRequest::new("t").with_message(ChatMessage::user("hi"));

        let err = gateway.complete(request).await.unwrap_err();
        assert!(matches!(err, ChatError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let gateway = MockChatGateway::new().with_text_reply("ok");
        let request = ChatRequest::new("trace-9").with_message(ChatMessage::user("hello"));

        gateway.complete(request).await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].trace_id, "trace-9");
    }
}
