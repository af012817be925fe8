//! Chat gateway adapters.

mod http;
mod mock;

pub use http::{GatewayConfig, HttpChatGateway};
pub use mock::MockChatGateway;
