//! HTTP DTOs for the universal search endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{DecisionResult, Transcript};

/// Request to run one clarify-or-decide step.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// The user's current utterance.
    pub query: String,
    /// Prior turns, oldest first. Empty on the first step.
    #[serde(default)]
    pub conversation_history: Transcript,
}

/// Response for one clarify-or-decide step.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Clarifying question(s) or the final recommendation with reasoning.
    pub response: String,
    /// True when the caller should gather another user turn.
    #[serde(rename = "needsMoreInfo")]
    pub needs_more_info: bool,
}

impl From<DecisionResult> for SearchResponse {
    fn from(result: DecisionResult) -> Self {
        Self {
            response: result.response_text,
            needs_more_info: result.needs_more_info,
        }
    }
}
