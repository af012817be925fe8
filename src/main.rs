//! Pickly server binary.
//!
//! Loads configuration from the environment (`PICKLY__*` variables, with
//! `.env` support in development), wires the reasoning gateway into the
//! domain services, and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pickly::adapters::gateway::{GatewayConfig, HttpChatGateway};
use pickly::adapters::http::{
    api_router, ingredients::IngredientHandlers, search::SearchHandlers,
};
use pickly::config::AppConfig;
use pickly::domain::decision::DecisionProtocol;
use pickly::domain::ingredients::IngredientExtractor;
use pickly::ports::ChatGateway;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("pickly failed to start: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());
    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.validate()?;

    let api_key = config.ai.api_key.clone().unwrap_or_default();
    let gateway_config = GatewayConfig::new(api_key)
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());
    let gateway: Arc<dyn ChatGateway> = Arc::new(HttpChatGateway::new(gateway_config)?);
    let gateway_info = gateway.gateway_info();

    let protocol = Arc::new(DecisionProtocol::new(gateway.clone()));
    let extractor = Arc::new(IngredientExtractor::new(gateway));

    let cors = cors_layer(&config)?;
    let app = api_router(
        SearchHandlers::new(protocol),
        IngredientHandlers::new(extractor),
        gateway_info,
    )
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )))
    .layer(cors);

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, model = %config.ai.model, "pickly listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the CORS layer: configured origins, or wide open when none are
/// configured (the original functions answered any origin).
fn cors_layer(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let mut values = Vec::with_capacity(origins.len());
    for origin in &origins {
        values.push(HeaderValue::from_str(origin)?);
    }
    Ok(CorsLayer::new()
        .allow_origin(values)
        .allow_methods(Any)
        .allow_headers(Any))
}
