//! HTTP handlers for the ingredient analysis endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::info;

use crate::adapters::http::error::{chat_error_response, invalid_argument};
use crate::domain::ingredients::{FridgePhoto, IngredientExtractor};

use super::dto::{AnalyzeIngredientsRequest, IngredientsResponse};

/// Handler state for ingredient endpoints.
#[derive(Clone)]
pub struct IngredientHandlers {
    extractor: Arc<IngredientExtractor>,
}

impl IngredientHandlers {
    pub fn new(extractor: Arc<IngredientExtractor>) -> Self {
        Self { extractor }
    }
}

/// POST /api/ingredients/analyze - extract visible food items from a photo
pub async fn analyze_ingredients(
    State(handlers): State<IngredientHandlers>,
    Json(req): Json<AnalyzeIngredientsRequest>,
) -> Response {
    let bytes = match STANDARD.decode(&req.image_base64) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        Ok(_) => return invalid_argument("image must not be empty"),
        Err(e) => return invalid_argument(format!("image_base64 is not valid base64: {e}")),
    };

    info!(image_bytes = bytes.len(), "analyzing uploaded photo");

    let photo = FridgePhoto::new(bytes, req.mime_type);
    match handlers.extractor.extract(&photo).await {
        Ok(ingredients) => {
            (StatusCode::OK, Json(IngredientsResponse { ingredients })).into_response()
        }
        Err(e) => chat_error_response(&e),
    }
}
