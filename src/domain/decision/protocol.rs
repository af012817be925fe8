//! Clarify-or-decide protocol.
//!
//! A two-state conversational controller. Each call is one
//! request/response step against the reasoning gateway: either the
//! assistant needs more information (it returns clarifying questions) or
//! it is ready to decide (it returns a recommendation with reasoning).
//! The protocol is stateless across calls; the caller owns the transcript
//! and keeps invoking [`DecisionProtocol::step`] until
//! `needs_more_info == false`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ports::{ChatError, ChatGateway, ChatMessage, ChatRequest, ToolSpec};

use super::transcript::{Transcript, TurnRole};

/// System instruction guiding the assistant's clarify-or-decide behavior.
const SYSTEM_PROMPT: &str = "\
You are a thoughtful decision-making assistant. Your job is to help users make decisions by:
1. If you don't have enough context, ask 1-2 specific clarifying questions to understand their situation better
2. Once you have sufficient context, provide a clear recommendation with reasoning
3. Keep responses conversational and natural

When you need more info, set needsMoreInfo to true and ask questions.
When ready to decide, set needsMoreInfo to false and provide the decision and reasoning.";

/// Name of the tool the gateway must answer through.
const RESPOND_TOOL: &str = "respond_to_user";

/// Terminal output of one protocol step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// True when the assistant asked clarifying questions instead of deciding.
    pub needs_more_info: bool,
    /// The clarifying question(s), or the recommendation with reasoning.
    pub response_text: String,
}

impl DecisionResult {
    /// True when this step produced a decision.
    pub fn is_decided(&self) -> bool {
        !self.needs_more_info
    }
}

/// Structured arguments the gateway must return through [`RESPOND_TOOL`].
///
/// Deserialized strictly: a missing or mistyped field is a malformed
/// response, never trusted through as untyped JSON.
#[derive(Debug, Deserialize)]
struct RespondArguments {
    response: String,
    #[serde(rename = "needsMoreInfo")]
    needs_more_info: bool,
}

/// The clarify-or-decide conversational controller.
pub struct DecisionProtocol {
    gateway: Arc<dyn ChatGateway>,
}

impl DecisionProtocol {
    /// Creates a protocol bound to a reasoning gateway.
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// Runs one clarify-or-decide step.
    ///
    /// Appends `current_utterance` as a final user turn to a working copy
    /// of `transcript` (the caller's transcript is never mutated), sends
    /// the full sequence to the gateway, and returns the structured
    /// result. No retry happens here; failures surface to the caller.
    ///
    /// # Errors
    ///
    /// - Upstream variants of [`ChatError`] when the gateway cannot be
    ///   reached or replies with a non-success status.
    /// - [`ChatError::MalformedResponse`] when a success reply carries no
    ///   parsable `{response, needsMoreInfo}` object.
    pub async fn step(
        &self,
        transcript: &Transcript,
        current_utterance: &str,
    ) -> Result<DecisionResult, ChatError> {
        let trace_id = Uuid::new_v4().to_string();
        debug!(
            trace_id,
            history_turns = transcript.len(),
            "running clarify-or-decide step"
        );

        let mut request = ChatRequest::new(&trace_id)
            .with_message(ChatMessage::system(SYSTEM_PROMPT))
            .with_tool(respond_tool());

        for turn in transcript.turns() {
            request = request.with_message(match turn.role {
                TurnRole::User => ChatMessage::user(&turn.content),
                TurnRole::Assistant => ChatMessage::assistant(&turn.content),
            });
        }
        request = request.with_message(ChatMessage::user(current_utterance));

        let reply = self.gateway.complete(request).await?;

        let arguments = reply
            .tool_arguments()
            .ok_or_else(|| ChatError::malformed("reply carries no respond_to_user tool call"))?;
        let parsed: RespondArguments = serde_json::from_str(arguments)
            .map_err(|e| ChatError::malformed(format!("invalid respond_to_user arguments: {e}")))?;

        info!(
            trace_id,
            needs_more_info = parsed.needs_more_info,
            "clarify-or-decide step complete"
        );

        Ok(DecisionResult {
            needs_more_info: parsed.needs_more_info,
            response_text: parsed.response,
        })
    }
}

/// Tool schema requiring the `{response, needsMoreInfo}` shape.
fn respond_tool() -> ToolSpec {
    ToolSpec::new(
        RESPOND_TOOL,
        "Respond to the user's decision request",
        json!({
            "type": "object",
            "properties": {
                "response": {
                    "type": "string",
                    "description": "Your response - either questions for clarification or your final decision with reasoning"
                },
                "needsMoreInfo": {
                    "type": "boolean",
                    "description": "True if you need to ask questions, false if ready to make a decision"
                }
            },
            "required": ["response", "needsMoreInfo"]
        }),
    )
}
