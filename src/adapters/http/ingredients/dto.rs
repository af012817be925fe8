//! HTTP DTOs for the ingredient analysis endpoint.

use serde::{Deserialize, Serialize};

/// Request to extract ingredients from a photo.
///
/// The photo arrives inline; where it was stored before upload is not
/// this service's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeIngredientsRequest {
    /// Base64-encoded image bytes (standard alphabet, padded).
    pub image_base64: String,
    /// MIME type of the encoded image.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "image/png".to_string()
}

/// Response listing the detected ingredients.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientsResponse {
    pub ingredients: Vec<String>,
}
