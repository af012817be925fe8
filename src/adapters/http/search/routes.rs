//! HTTP routes for the universal search endpoint.

use axum::{routing::post, Router};

use super::handlers::{universal_search, SearchHandlers};

/// Creates the search router.
pub fn search_routes(handlers: SearchHandlers) -> Router {
    Router::new()
        .route("/", post(universal_search))
        .with_state(handlers)
}
