//! HTTP handlers for the universal search endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::adapters::http::error::{chat_error_response, invalid_argument};
use crate::domain::decision::DecisionProtocol;

use super::dto::{SearchRequest, SearchResponse};

/// Handler state for search endpoints.
#[derive(Clone)]
pub struct SearchHandlers {
    protocol: Arc<DecisionProtocol>,
}

impl SearchHandlers {
    pub fn new(protocol: Arc<DecisionProtocol>) -> Self {
        Self { protocol }
    }
}

/// POST /api/search - run one clarify-or-decide step
pub async fn universal_search(
    State(handlers): State<SearchHandlers>,
    Json(req): Json<SearchRequest>,
) -> Response {
    if req.query.trim().is_empty() {
        return invalid_argument("query must not be empty");
    }

    info!(
        history_turns = req.conversation_history.len(),
        "processing search query"
    );

    match handlers
        .protocol
        .step(&req.conversation_history, &req.query)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(SearchResponse::from(result))).into_response(),
        Err(e) => chat_error_response(&e),
    }
}
