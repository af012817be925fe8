//! HTTP adapters - axum routers, handlers, and DTOs.

pub mod error;
pub mod ingredients;
pub mod mindmap;
pub mod search;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::ports::GatewayInfo;

use ingredients::{ingredient_routes, IngredientHandlers};
use mindmap::mindmap_routes;
use search::{search_routes, SearchHandlers};

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
    gateway: GatewayInfo,
}

/// Assembles the full API router.
pub fn api_router(
    search: SearchHandlers,
    ingredients: IngredientHandlers,
    gateway_info: GatewayInfo,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(gateway_info)
        .nest("/api/search", search_routes(search))
        .nest("/api/ingredients", ingredient_routes(ingredients))
        .nest("/api/mindmap", mindmap_routes())
}

/// GET /health - liveness probe
async fn health(State(gateway): State<GatewayInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        gateway,
    })
}
