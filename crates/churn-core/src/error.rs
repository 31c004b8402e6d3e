//! Error types for Churn Core

use thiserror::Error;

/// Errors raised while validating or transforming a customer record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Record is not usable as a whole (e.g. not a JSON object)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required field missing
    #[error("Required field missing: {0}")]
    MissingField(String),

    /// Field present with the wrong JSON type
    #[error("Invalid type for field '{field}': expected {expected}")]
    InvalidFieldType { field: String, expected: String },

    /// Categorical value not seen when the encoder was fitted
    #[error("Unknown category for field '{field}': '{value}'")]
    UnknownCategory { field: String, value: String },

    /// Expected model input column could not be produced
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, TransformError>;
