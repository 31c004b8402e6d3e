//! Feature engineering
//!
//! The same transform runs at training time (fit mode, via
//! [`Preprocessor::fit`]) and at inference time (apply mode, via
//! [`Preprocessor::transform`]). Engineered features are always derived
//! from the raw string values before anything is encoded or scaled.

mod encoder;
mod engineered;
mod scaler;
mod transform;

pub use encoder::LabelEncoder;
pub use engineered::EngineeredFeatures;
pub use scaler::StandardScaler;
pub use transform::{numerical_values, Preprocessor};
