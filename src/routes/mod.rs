use std::sync::Arc;

use axum::{
    http::{Method, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::AppResult,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{
        providers::{VideoSearchProvider, YouTubeProvider},
        proxy::ResultLimits,
    },
};

pub mod search;
pub mod selection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn VideoSearchProvider>,
    pub limits: ResultLimits,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn VideoSearchProvider>) -> Self {
        let limits = ResultLimits {
            default: config.default_max_results,
            cap: config.max_results_cap,
        };
        Self {
            config: Arc::new(config),
            provider,
            limits,
        }
    }

    /// State backed by the real YouTube Data API
    pub fn from_config(config: Config) -> AppResult<Self> {
        let provider =
            YouTubeProvider::new(config.youtube_api_url.clone(), config.upstream_timeout())?;
        Ok(Self::new(config, Arc::new(provider)))
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(cors),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/youtube-search", get(search::youtube_search))
        .route("/options", get(selection::options))
        .route("/query", get(selection::build_query))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
