//! Pickly - Everyday Decision Assistant
//!
//! This crate helps a user make small everyday decisions (what to cook,
//! what to do) by combining a clarify-or-decide conversational protocol
//! against a remote reasoning gateway with a deterministic radial
//! mind-map layout used to visualize how a recommendation was reached.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
