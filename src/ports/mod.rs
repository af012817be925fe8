//! Ports - interfaces to external collaborators.
//!
//! Ports define what the domain needs from the outside world without
//! binding it to a concrete implementation. Adapters in `crate::adapters`
//! provide the implementations.

mod chat_gateway;

pub use chat_gateway::{
    ChatError, ChatGateway, ChatMessage, ChatReply, ChatRequest, ChatRole, ContentPart,
    GatewayInfo, ImageUrl, MessageContent, ToolCall, ToolSpec,
};
