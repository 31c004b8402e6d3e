//! Churn model training CLI
//!
//! Trains the classifier from a historical CSV and writes the artifact set
//! the prediction server loads at startup.

use anyhow::{Context, Result};
use churn_model::{TrainingConfig, TrainingPipeline};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "churn-train", about = "Train the customer churn model")]
struct Cli {
    /// YAML training configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset CSV (overrides the config file)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Artifact output directory (overrides the config file)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => TrainingConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => TrainingConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(output) = cli.output {
        config.model_dir = output;
    }
    if let Some(seed) = cli.seed {
        config.random_state = seed;
    }
    info!("Training configuration: {:?}", config);

    let report = TrainingPipeline::new(config).run()?;
    info!(
        "✓ Model trained: ROC-AUC {:.4} on {} held-out records",
        report.metrics.roc_auc, report.test_records
    );
    info!("  Artifacts: {}", report.model_dir.display());

    Ok(())
}

/// Used when `RUST_LOG` is unset; covers the binary's own target and the library
const DEFAULT_LOG_FILTER: &str = "churn_train=info,churn_model=info";

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
