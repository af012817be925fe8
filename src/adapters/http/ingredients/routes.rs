//! HTTP routes for the ingredient analysis endpoint.

use axum::{routing::post, Router};

use super::handlers::{analyze_ingredients, IngredientHandlers};

/// Creates the ingredients router.
pub fn ingredient_routes(handlers: IngredientHandlers) -> Router {
    Router::new()
        .route("/analyze", post(analyze_ingredients))
        .with_state(handlers)
}
