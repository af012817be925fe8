//! HTTP routes for the mind-map scene endpoint.

use axum::{routing::post, Router};

use super::handlers::mindmap_scene;

/// Creates the mind-map router.
pub fn mindmap_routes() -> Router {
    Router::new().route("/scene", post(mindmap_scene))
}
