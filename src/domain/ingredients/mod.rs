//! Fridge-photo ingredient extraction.
//!
//! One-shot sibling of the decision protocol: a photo goes to the
//! reasoning gateway inline with an instruction to enumerate visible food
//! items, and the structured `{ingredients: [...]}` reply is parsed
//! strictly. Same failure taxonomy, same no-retry policy.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ports::{ChatError, ChatGateway, ChatMessage, ChatRequest};

/// Instruction sent alongside the photo.
const EXTRACTION_PROMPT: &str = "Analyze this fridge photo and list all visible food \
ingredients. Return your response as a JSON object with an \"ingredients\" field \
containing an array of ingredient names as strings.";

/// An uploaded photo, held in memory for one extraction.
#[derive(Debug, Clone)]
pub struct FridgePhoto {
    bytes: Vec<u8>,
    mime_type: String,
}

impl FridgePhoto {
    /// Creates a photo from raw bytes and their MIME type.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Encodes the photo as an inline `data:` URL for the gateway.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Structured reply the gateway must return.
#[derive(Debug, Deserialize)]
struct IngredientsPayload {
    ingredients: Vec<String>,
}

/// One-shot ingredient extraction against the reasoning gateway.
pub struct IngredientExtractor {
    gateway: Arc<dyn ChatGateway>,
}

impl IngredientExtractor {
    /// Creates an extractor bound to a reasoning gateway.
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// Extracts the list of visible food items from a photo.
    ///
    /// # Errors
    ///
    /// - Upstream variants of [`ChatError`] when the gateway cannot be
    ///   reached or replies with a non-success status.
    /// - [`ChatError::MalformedResponse`] when a success reply carries no
    ///   parsable `{ingredients: [...]}` object.
    pub async fn extract(&self, photo: &FridgePhoto) -> Result<Vec<String>, ChatError> {
        let trace_id = Uuid::new_v4().to_string();
        debug!(
            trace_id,
            image_bytes = photo.bytes.len(),
            mime_type = %photo.mime_type,
            "extracting ingredients from photo"
        );

        let request = ChatRequest::new(&trace_id)
            .with_message(ChatMessage::user_with_image(
                EXTRACTION_PROMPT,
                photo.data_url(),
            ))
            .with_json_response();

        let reply = self.gateway.complete(request).await?;

        let content = reply
            .content
            .as_deref()
            .ok_or_else(|| ChatError::malformed("reply carries no content"))?;
        let payload: IngredientsPayload = serde_json::from_str(content)
            .map_err(|e| ChatError::malformed(format!("invalid ingredients payload: {e}")))?;

        info!(
            trace_id,
            count = payload.ingredients.len(),
            "ingredients extracted"
        );

        Ok(payload.ingredients)
    }
}
