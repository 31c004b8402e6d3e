//! Startup artifact loading
//!
//! A failed load does not stop the server: it starts without a model,
//! reports unhealthy and answers prediction requests with 500.

use crate::config::ServerConfig;
use churn_model::ChurnPredictor;
use std::sync::Arc;
use tracing::{error, info};

/// Load the artifact set named by the configuration
pub fn load_predictor(config: &ServerConfig) -> Option<Arc<ChurnPredictor>> {
    match ChurnPredictor::load(&config.artifact_dir) {
        Ok(predictor) => {
            info!(
                "All models and artifacts loaded successfully ({})",
                predictor.metadata().model_name
            );
            Some(Arc::new(predictor))
        }
        Err(e) => {
            error!("Error loading models: {}", e);
            None
        }
    }
}
