//! API endpoint handlers

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{extract::State, Json};
use churn_model::ChurnPredictor;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

const MODEL_NOT_LOADED: &str = "Model not loaded";
const NO_INPUT: &str = "No input data provided";

fn require_predictor(state: &AppState) -> Result<Arc<ChurnPredictor>, ServerError> {
    state
        .predictor
        .clone()
        .ok_or_else(|| ServerError::ModelUnavailable(MODEL_NOT_LOADED.to_string()))
}

/// Falsy payloads (`null`, `false`, `0`, `{}`, `[]`, `""`) count as no input
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Service banner
pub(super) async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "healthy".to_string(),
        message: "Customer Churn Prediction API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: timestamp(),
    })
}

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::from_state(&state))
}

/// Single prediction endpoint
pub(super) async fn predict(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<Value>,
) -> Result<Json<PredictResponse>, ServerError> {
    let predictor = require_predictor(&state)?;
    if is_empty_payload(&payload) {
        return Err(ServerError::InvalidRequest(NO_INPUT.to_string()));
    }

    let prediction = predictor.predict_json(&payload).map_err(|e| {
        error!("Prediction error: {}", e);
        ServerError::from(e)
    })?;
    info!(
        "Predicted churn probability {:.4} ({})",
        prediction.churn_probability, prediction.risk_level
    );

    Ok(Json(PredictResponse {
        prediction,
        timestamp: timestamp(),
    }))
}

/// Batch prediction endpoint
pub(super) async fn predict_batch(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<Value>,
) -> Result<Json<BatchResponse>, ServerError> {
    let predictor = require_predictor(&state)?;
    let records = payload.as_array().ok_or_else(|| {
        ServerError::InvalidRequest("Input must be a list of records".to_string())
    })?;

    let results = predictor.predict_batch(records);
    let failed = results.iter().filter(|r| !r.is_success()).count();
    info!(
        "Batch prediction: {} records, {} failed",
        results.len(),
        failed
    );

    Ok(Json(BatchResponse {
        total: results.len(),
        results,
        timestamp: timestamp(),
    }))
}

/// Model information endpoint
pub(super) async fn model_info(
    State(state): State<AppState>,
) -> Result<Json<ModelInfoResponse>, ServerError> {
    let predictor = state
        .predictor
        .as_deref()
        .ok_or_else(|| ServerError::ModelUnavailable("Model metadata not loaded".to_string()))?;
    Ok(Json(ModelInfoResponse::from_predictor(predictor)))
}

/// Required fields and their valid values
pub(super) async fn features() -> Json<FeatureCatalog> {
    Json(FeatureCatalog::build())
}

/// Retention recommendations endpoint
pub(super) async fn recommendations(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<Value>,
) -> Result<Json<RecommendationResponse>, ServerError> {
    if is_empty_payload(&payload) {
        return Err(ServerError::InvalidRequest(NO_INPUT.to_string()));
    }
    let predictor = require_predictor(&state)?;

    let report = predictor.recommend(&payload).map_err(|e| {
        error!("Recommendations error: {}", e);
        ServerError::from(e)
    })?;

    Ok(Json(RecommendationResponse {
        report,
        timestamp: timestamp(),
    }))
}

/// Fallback for unknown routes
pub(super) async fn not_found() -> ServerError {
    ServerError::NotFound("Endpoint not found".to_string())
}
