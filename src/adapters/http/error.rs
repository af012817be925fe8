//! Shared HTTP error responses.
//!
//! Every failure leaves the API as a typed `{code, message}` body. Quota
//! and rate-limit failures keep their own status codes and user-readable
//! messages; everything else upstream collapses to a gateway error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::ports::ChatError;

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// 400 response for a rejected argument.
pub fn invalid_argument(message: impl Into<String>) -> Response {
    let message = message.into();
    warn!(code = "INVALID_ARGUMENT", %message, "rejected request");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("INVALID_ARGUMENT", message)),
    )
        .into_response()
}

/// Maps a gateway failure onto its HTTP representation.
pub fn chat_error_response(err: &ChatError) -> Response {
    let status = match err {
        ChatError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
        ChatError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ChatError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ChatError::Unavailable { .. }
        | ChatError::Network(_)
        | ChatError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
    };
    warn!(code = err.code(), error = %err, "upstream call failed");
    (
        status,
        Json(ErrorResponse::new(err.code(), err.to_string())),
    )
        .into_response()
}
