//! Clarify-or-decide decision domain.

mod protocol;
mod transcript;

pub use protocol::{DecisionProtocol, DecisionResult};
pub use transcript::{Transcript, Turn, TurnRole};
