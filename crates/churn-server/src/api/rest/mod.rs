//! REST API implementation
//!
//! - types: application state and response payloads
//! - extractors: JSON body extraction with JSON error replies
//! - handlers: endpoint handlers
//! - router: route table and middleware layers

mod extractors;
mod handlers;
mod router;
pub mod types;

// Re-export public API
pub use extractors::JsonExtractor;
pub use router::{create_router, create_router_with_cors};
pub use types::{
    AppState, BatchResponse, FeatureCatalog, HealthResponse, ModelInfoResponse,
    PredictResponse, RecommendationResponse, RootResponse,
};
