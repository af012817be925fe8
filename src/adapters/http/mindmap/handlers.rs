//! HTTP handlers for the mind-map scene endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::invalid_argument;
use crate::adapters::render::compose_scene;
use crate::domain::mindmap::{layout, NodeKind, Point};

use super::dto::{SceneRequest, SceneResponse};

/// POST /api/mindmap/scene - lay out nodes and compose the drawing sequence
///
/// The layout is computed at the surface center, matching how the client
/// canvas renders the map.
pub async fn mindmap_scene(Json(req): Json<SceneRequest>) -> Response {
    if !req.width.is_finite() || req.width <= 0.0 || !req.height.is_finite() || req.height <= 0.0 {
        return invalid_argument("width and height must be positive, finite numbers");
    }
    if req.nodes.iter().any(|n| n.kind == NodeKind::Final) {
        return invalid_argument("node kind 'final' is reserved for the anchor");
    }
    if req.nodes.iter().any(|n| n.label.trim().is_empty()) {
        return invalid_argument("node labels must not be empty");
    }

    let center = Point::new(req.width / 2.0, req.height / 2.0);
    let map = match layout(&req.nodes, center, req.radius) {
        Ok(map) => map,
        Err(e) => return invalid_argument(e.to_string()),
    };

    let scene = compose_scene(&req.nodes, &map, &req.decision_label);
    (StatusCode::OK, Json(SceneResponse::new(map, scene))).into_response()
}
