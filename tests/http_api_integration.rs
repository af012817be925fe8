//! Integration tests for the HTTP API.
//!
//! These tests wire the full router against the mock gateway and drive it
//! in-process with `tower::ServiceExt::oneshot`:
//! 1. Request DTOs deserialize correctly
//! 2. Domain operations run end to end behind the handlers
//! 3. Failures map onto the documented status codes and reason codes

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use pickly::adapters::gateway::MockChatGateway;
use pickly::adapters::http::{
    api_router, ingredients::IngredientHandlers, search::SearchHandlers,
};
use pickly::domain::decision::DecisionProtocol;
use pickly::domain::ingredients::IngredientExtractor;
use pickly::ports::{ChatError, ChatGateway};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(gateway: MockChatGateway) -> axum::Router {
    let gateway: Arc<dyn ChatGateway> = Arc::new(gateway);
    let gateway_info = gateway.gateway_info();
    api_router(
        SearchHandlers::new(Arc::new(DecisionProtocol::new(gateway.clone()))),
        IngredientHandlers::new(Arc::new(IngredientExtractor::new(gateway))),
        gateway_info,
    )
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn assert_close(actual: &Value, expected: f64, tolerance: f64) {
    let actual = actual.as_f64().expect("expected a number");
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_gateway() {
    let response = app(MockChatGateway::new())
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["gateway"]["name"], "mock");
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn search_surfaces_clarifying_question() {
    let gateway = MockChatGateway::new().with_tool_reply(
        "respond_to_user",
        r#"{"response":"Is it raining where you are?","needsMoreInfo":true}"#,
    );

    let (status, body) = post_json(
        app(gateway),
        "/api/search",
        json!({"query": "what should I do tonight?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["needsMoreInfo"], json!(true));
    assert_eq!(body["response"], "Is it raining where you are?");
}

#[tokio::test]
async fn search_returns_decision_with_history() {
    let gateway = MockChatGateway::new().with_tool_reply(
        "respond_to_user",
        r#"{"response":"Go for a walk, because the rain has stopped and it's free.","needsMoreInfo":false}"#,
    );

    let (status, body) = post_json(
        app(gateway),
        "/api/search",
        json!({
            "query": "it stopped raining",
            "conversation_history": [
                {"role": "user", "content": "what should I do tonight?"},
                {"role": "assistant", "content": "Is it raining where you are?"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["needsMoreInfo"], json!(false));
    assert_eq!(
        body["response"],
        "Go for a walk, because the rain has stopped and it's free."
    );
}

#[tokio::test]
async fn search_rejects_blank_query() {
    let (status, body) = post_json(
        app(MockChatGateway::new()),
        "/api/search",
        json!({"query": "   "}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn search_maps_quota_exhaustion_to_402() {
    let gateway = MockChatGateway::new().with_error(ChatError::QuotaExhausted);

    let (status, body) = post_json(app(gateway), "/api/search", json!({"query": "hi"})).await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], "QUOTA_EXHAUSTED");
    // The message is user-readable, not a generic failure string.
    assert!(body["message"].as_str().unwrap().contains("credits"));
}

#[tokio::test]
async fn search_maps_rate_limit_to_429() {
    let gateway = MockChatGateway::new().with_error(ChatError::RateLimited);

    let (status, body) = post_json(app(gateway), "/api/search", json!({"query": "hi"})).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn search_maps_malformed_reply_to_502() {
    let gateway = MockChatGateway::new().with_text_reply("free text, no tool call");

    let (status, body) = post_json(app(gateway), "/api/search", json!({"query": "hi"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "MALFORMED_UPSTREAM_RESPONSE");
}

#[tokio::test]
async fn search_maps_timeout_to_504() {
    let gateway =
        MockChatGateway::new().with_error(ChatError::Timeout { timeout_secs: 30 });

    let (status, body) = post_json(app(gateway), "/api/search", json!({"query": "hi"})).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["code"], "UPSTREAM_TIMEOUT");
}

// =============================================================================
// Mind map
// =============================================================================

#[tokio::test]
async fn mindmap_scene_places_reference_nodes() {
    // Three nodes on a 200x200 surface with radius 120: anchor at the
    // center, first node at 12 o'clock, the others at 30° and 150°.
    let (status, body) = post_json(
        app(MockChatGateway::new()),
        "/api/mindmap/scene",
        json!({
            "nodes": [
                {"label": "Rainy weather", "kind": "input"},
                {"label": "Evening", "kind": "context"},
                {"label": "Budget: low", "kind": "context"}
            ],
            "width": 200.0,
            "height": 200.0,
            "radius": 120.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["anchor"]["x"], json!(100.0));
    assert_eq!(body["anchor"]["y"], json!(100.0));
    assert_eq!(body["anchor"]["color_token"], "anchorColor");

    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);

    assert_close(&points[0]["x"], 100.0, 1e-9);
    assert_close(&points[0]["y"], -20.0, 1e-9);
    assert_eq!(points[0]["color_token"], "accentA");

    assert_close(&points[1]["x"], 203.923, 1e-2);
    assert_close(&points[1]["y"], 160.0, 1e-6);
    assert_eq!(points[1]["color_token"], "accentB");

    assert_close(&points[2]["x"], -3.923, 1e-2);
    assert_close(&points[2]["y"], 160.0, 1e-6);

    // 3 commands per node + anchor marker + caption, legend row per node.
    assert_eq!(body["commands"].as_array().unwrap().len(), 11);
    assert_eq!(body["legend"].as_array().unwrap().len(), 3);
    assert_eq!(body["legend"][0]["label"], "Rainy weather");
}

#[tokio::test]
async fn mindmap_scene_accepts_empty_node_list() {
    let (status, body) = post_json(
        app(MockChatGateway::new()),
        "/api/mindmap/scene",
        json!({"nodes": [], "width": 200.0, "height": 100.0}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points"].as_array().unwrap().len(), 0);
    assert_eq!(body["anchor"]["x"], json!(100.0));
    assert_eq!(body["anchor"]["y"], json!(50.0));
    // Anchor marker + caption still drawn.
    assert_eq!(body["commands"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn mindmap_scene_rejects_non_positive_radius() {
    let (status, body) = post_json(
        app(MockChatGateway::new()),
        "/api/mindmap/scene",
        json!({
            "nodes": [{"label": "Evening", "kind": "context"}],
            "width": 200.0,
            "height": 200.0,
            "radius": 0.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn mindmap_scene_rejects_reserved_final_kind() {
    let (status, body) = post_json(
        app(MockChatGateway::new()),
        "/api/mindmap/scene",
        json!({
            "nodes": [{"label": "Decision", "kind": "final"}],
            "width": 200.0,
            "height": 200.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

// =============================================================================
// Ingredients
// =============================================================================

#[tokio::test]
async fn analyze_returns_ingredient_list() {
    let gateway =
        MockChatGateway::new().with_text_reply(r#"{"ingredients":["eggs","milk","spinach"]}"#);

    let (status, body) = post_json(
        app(gateway),
        "/api/ingredients/analyze",
        json!({"image_base64": "iVBORw==", "mime_type": "image/png"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ingredients"], json!(["eggs", "milk", "spinach"]));
}

#[tokio::test]
async fn analyze_rejects_invalid_base64() {
    let (status, body) = post_json(
        app(MockChatGateway::new()),
        "/api/ingredients/analyze",
        json!({"image_base64": "not base64!!!"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn analyze_maps_unparsable_reply_to_502() {
    let gateway = MockChatGateway::new().with_text_reply("I can see eggs and milk");

    let (status, body) = post_json(
        app(gateway),
        "/api/ingredients/analyze",
        json!({"image_base64": "iVBORw=="}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "MALFORMED_UPSTREAM_RESPONSE");
}
