//! REST API type definitions
//!
//! Application state and the response payloads for every endpoint.

use churn_core::schema::{
    categorical_options, CATEGORICAL_FIELDS, NUMERICAL_FIELDS, SENIOR_CITIZEN_OPTIONS,
};
use churn_model::{BatchOutcome, ChurnPredictor, GbdtParams, Prediction, RecommendationReport};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Application state
///
/// `predictor` is `None` when the artifacts failed to load at startup.
#[derive(Clone, Default)]
pub struct AppState {
    pub predictor: Option<Arc<ChurnPredictor>>,
}

impl AppState {
    pub fn new(predictor: Option<Arc<ChurnPredictor>>) -> Self {
        Self { predictor }
    }

    pub fn with_predictor(predictor: ChurnPredictor) -> Self {
        Self::new(Some(Arc::new(predictor)))
    }

    /// State of a server whose artifacts could not be loaded
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.predictor.is_some()
    }
}

/// Current time as an RFC 3339 string
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// `GET /` response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
    pub encoders_loaded: bool,
    pub timestamp: String,
}

impl HealthResponse {
    /// Artifacts load all-or-nothing, so every flag follows the model
    pub fn from_state(state: &AppState) -> Self {
        let loaded = state.is_loaded();
        Self {
            status: if loaded { "healthy" } else { "unhealthy" }.to_string(),
            model_loaded: loaded,
            scaler_loaded: loaded,
            encoders_loaded: loaded,
            timestamp: timestamp(),
        }
    }
}

/// Single prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub prediction: Prediction,
    pub timestamp: String,
}

/// Batch prediction response
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchOutcome>,
    pub total: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct MetricsPayload {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub roc_auc: f64,
}

#[derive(Debug, Serialize)]
pub struct FeatureCounts {
    pub total: usize,
    pub categorical: usize,
    pub numerical: usize,
}

/// Model information response
#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub model_name: String,
    pub metrics: MetricsPayload,
    pub features: FeatureCounts,
    pub hyperparameters: GbdtParams,
    pub timestamp: String,
}

impl ModelInfoResponse {
    pub fn from_predictor(predictor: &ChurnPredictor) -> Self {
        let metadata = predictor.metadata();
        Self {
            model_name: metadata.model_name.clone(),
            metrics: MetricsPayload {
                accuracy: metadata.accuracy,
                precision: metadata.precision,
                recall: metadata.recall,
                f1_score: metadata.f1_score,
                roc_auc: metadata.roc_auc,
            },
            features: FeatureCounts {
                total: predictor.preprocessor().feature_names().len(),
                categorical: metadata.categorical_columns.len(),
                numerical: metadata.numerical_columns.len(),
            },
            hyperparameters: metadata.best_params.clone(),
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RequiredFeatures {
    pub categorical: Vec<&'static str>,
    pub numerical: Vec<&'static str>,
}

/// Static catalog of the fields a client must send
#[derive(Debug, Serialize)]
pub struct FeatureCatalog {
    pub required_features: RequiredFeatures,
    pub feature_options: Map<String, Value>,
    pub total_features: usize,
}

impl FeatureCatalog {
    pub fn build() -> Self {
        let mut feature_options = Map::new();
        for (field, options) in categorical_options() {
            feature_options.insert(field.to_string(), Value::from(options));
        }
        feature_options.insert(
            "SeniorCitizen".to_string(),
            Value::from(SENIOR_CITIZEN_OPTIONS.to_vec()),
        );

        Self {
            required_features: RequiredFeatures {
                categorical: CATEGORICAL_FIELDS.to_vec(),
                numerical: NUMERICAL_FIELDS.to_vec(),
            },
            feature_options,
            total_features: CATEGORICAL_FIELDS.len() + NUMERICAL_FIELDS.len(),
        }
    }
}

/// Recommendations response
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub report: RecommendationReport,
    pub timestamp: String,
}
