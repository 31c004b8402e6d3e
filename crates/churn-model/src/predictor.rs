//! Immutable inference context
//!
//! Built once from the loaded artifacts and shared read-only for the life
//! of the process. Every call is a pure function of its input record.

use crate::artifacts::{ModelArtifacts, ModelMetadata};
use crate::classifier::ChurnClassifier;
use crate::error::{ModelError, Result};
use crate::metrics::DECISION_THRESHOLD;
use churn_core::{generate_recommendations, CustomerRecord, Preprocessor, Recommendation, RiskLevel};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Outcome of scoring one customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub churn: bool,
    pub churn_probability: f64,
    /// Probability of the predicted class
    pub confidence: f64,
    pub risk_level: RiskLevel,
}

impl Prediction {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            churn: probability > DECISION_THRESHOLD,
            churn_probability: probability,
            confidence: probability.max(1.0 - probability),
            risk_level: RiskLevel::from_probability(probability),
        }
    }
}

/// Per-record slot of a batch prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Success {
        index: usize,
        #[serde(flatten)]
        prediction: Prediction,
    },
    Failure {
        index: usize,
        error: String,
    },
}

impl BatchOutcome {
    pub fn index(&self) -> usize {
        match self {
            BatchOutcome::Success { index, .. } | BatchOutcome::Failure { index, .. } => *index,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success { .. })
    }
}

/// Probability, tier and retention actions for one customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub churn_probability: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<Recommendation>,
}

/// Classifier plus the fitted transform it was trained behind
pub struct ChurnPredictor {
    classifier: Box<dyn ChurnClassifier>,
    preprocessor: Preprocessor,
    metadata: ModelMetadata,
}

impl ChurnPredictor {
    pub fn new(
        classifier: Box<dyn ChurnClassifier>,
        preprocessor: Preprocessor,
        metadata: ModelMetadata,
    ) -> Self {
        Self {
            classifier,
            preprocessor,
            metadata,
        }
    }

    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        Self::new(
            Box::new(artifacts.model),
            artifacts.preprocessor,
            artifacts.metadata,
        )
    }

    /// Load the artifact directory and build the context
    pub fn load(dir: &Path) -> Result<Self> {
        ModelArtifacts::load(dir).map(Self::from_artifacts)
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    /// Churn probability for a validated record
    pub fn churn_probability(&self, record: &CustomerRecord) -> Result<f64> {
        let features = self.preprocessor.transform(record)?;
        let probabilities = self.classifier.predict_proba(&[features])?;
        probabilities
            .first()
            .copied()
            .ok_or_else(|| ModelError::Prediction("classifier returned no score".to_string()))
    }

    pub fn predict(&self, record: &CustomerRecord) -> Result<Prediction> {
        self.churn_probability(record)
            .map(Prediction::from_probability)
    }

    /// Validate an untyped record and score it
    pub fn predict_json(&self, value: &Value) -> Result<Prediction> {
        let record = CustomerRecord::from_json(value)?;
        self.predict(&record)
    }

    /// Score records one at a time; a failing record only fails its own slot
    pub fn predict_batch(&self, values: &[Value]) -> Vec<BatchOutcome> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| match self.predict_json(value) {
                Ok(prediction) => BatchOutcome::Success { index, prediction },
                Err(e) => {
                    warn!("Batch record {} failed: {}", index, e);
                    BatchOutcome::Failure {
                        index,
                        error: e.to_string(),
                    }
                }
            })
            .collect()
    }

    /// Score a record and derive retention actions from it
    pub fn recommend(&self, value: &Value) -> Result<RecommendationReport> {
        let record = CustomerRecord::from_json(value)?;
        let probability = self.churn_probability(&record)?;
        Ok(RecommendationReport {
            churn_probability: probability,
            risk_level: RiskLevel::from_probability(probability),
            recommendations: generate_recommendations(&record, probability),
        })
    }
}
