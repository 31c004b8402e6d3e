//! Model error types

use churn_core::TransformError;
use thiserror::Error;

/// Model, artifact and training error
#[derive(Error, Debug)]
pub enum ModelError {
    /// A persisted artifact could not be read or decoded
    #[error("Failed to load artifact '{artifact}': {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    /// A persisted artifact could not be written
    #[error("Failed to save artifact '{artifact}': {reason}")]
    ArtifactSave { artifact: String, reason: String },

    /// Record validation or feature transform failed
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Training data is unusable
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Training could not complete
    #[error("Training error: {0}")]
    Training(String),

    /// Classifier could not score the input
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
