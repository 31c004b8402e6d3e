//! Churn Core - Core types and transforms for churn prediction
//!
//! This crate provides the pure, I/O-free parts of the system:
//! - The customer record schema and its validation
//! - The feature transform shared by training and inference
//! - Risk tiering of churn probabilities
//! - The rule-based retention recommendation generator
//! - Error types

pub mod error;
pub mod features;
pub mod recommend;
pub mod record;
pub mod risk;
pub mod schema;

// Re-export commonly used types
pub use error::{Result, TransformError};
pub use features::{EngineeredFeatures, LabelEncoder, Preprocessor, StandardScaler};
pub use recommend::{generate_recommendations, Impact, Priority, Recommendation};
pub use record::CustomerRecord;
pub use risk::RiskLevel;
