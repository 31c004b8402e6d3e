//! Training pipeline
//!
//! Reads historical records, fits the feature transform, rebalances the
//! training split, searches the hyperparameter lattice and persists the
//! resulting artifacts.

pub mod config;
pub mod dataset;
pub mod grid_search;
pub mod pipeline;
pub mod smote;
pub mod split;

pub use config::{ParamGrid, TrainingConfig};
pub use dataset::Dataset;
pub use grid_search::{GridSearch, GridSearchResult};
pub use pipeline::{TrainingPipeline, TrainingReport};
pub use smote::Smote;
