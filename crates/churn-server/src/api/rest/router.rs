//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the REST API router with permissive CORS
pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, true)
}

/// Create the REST API router, optionally without the CORS layer
pub fn create_router_with_cors(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/predict", post(predict))
        .route("/api/predict/batch", post(predict_batch))
        .route("/api/model/info", get(model_info))
        .route("/api/features", get(features))
        .route("/api/recommendations", post(recommendations))
        .fallback(not_found)
        .with_state(state);

    let router = if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };
    router.layer(TraceLayer::new_for_http())
}
