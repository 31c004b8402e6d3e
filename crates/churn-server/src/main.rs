//! Customer churn prediction HTTP server
//!
//! Serves churn predictions and retention recommendations from a trained
//! artifact set.

use anyhow::Result;
use churn_server::api::{self, AppState};
use churn_server::config::ServerConfig;
use churn_server::loader::load_predictor;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!("Loaded configuration: {:?}", config);

    // Load model artifacts; the server starts either way
    let state = AppState::new(load_predictor(&config));
    if !state.is_loaded() {
        warn!(
            "Serving without a model; train one into {} and restart",
            config.artifact_dir.display()
        );
    }

    let app = api::rest::create_router_with_cors(state, config.enable_cors);

    // Start server
    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/api/health", addr);
    info!("  Predict API: POST http://{}/api/predict", addr);
    info!("  Batch API: POST http://{}/api/predict/batch", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "churn_server={level},churn_model={level},tower_http=debug",
                    level = level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
