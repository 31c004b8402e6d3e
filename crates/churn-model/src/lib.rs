//! Churn model: classifier, persisted artifacts, inference and training

pub mod artifacts;
pub mod classifier;
pub mod error;
pub mod metrics;
pub mod predictor;
pub mod training;

pub use artifacts::{ModelArtifacts, ModelMetadata};
pub use classifier::{ChurnClassifier, GbdtClassifier, GbdtParams};
pub use error::{ModelError, Result};
pub use metrics::{ConfusionMatrix, EvaluationMetrics};
pub use predictor::{BatchOutcome, ChurnPredictor, Prediction, RecommendationReport};
pub use training::{TrainingConfig, TrainingPipeline, TrainingReport};
