//! Adapters - concrete implementations at the system's edges.

pub mod gateway;
pub mod http;
pub mod render;
