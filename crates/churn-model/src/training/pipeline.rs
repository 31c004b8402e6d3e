//! End-to-end training run

use super::config::TrainingConfig;
use super::dataset::Dataset;
use super::grid_search::GridSearch;
use super::smote::Smote;
use super::split::stratified_split;
use crate::artifacts::{ModelArtifacts, ModelMetadata};
use crate::classifier::{ChurnClassifier, GbdtClassifier, GbdtParams};
use crate::error::{ModelError, Result};
use crate::metrics::EvaluationMetrics;
use churn_core::{CustomerRecord, Preprocessor};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Summary of a finished training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub train_records: usize,
    pub test_records: usize,
    pub balanced_records: usize,
    pub best_params: GbdtParams,
    pub best_cv_score: f64,
    pub metrics: EvaluationMetrics,
    pub model_dir: PathBuf,
}

pub struct TrainingPipeline {
    config: TrainingConfig,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Load the configured CSV and train on it
    pub fn run(&self) -> Result<TrainingReport> {
        let dataset = Dataset::load_csv(&self.config.data_path)?;
        self.run_on(&dataset)
    }

    /// Train on an already loaded dataset and write the artifacts
    pub fn run_on(&self, dataset: &Dataset) -> Result<TrainingReport> {
        self.config.validate()?;
        let started = Instant::now();

        let (train_idx, test_idx) =
            stratified_split(&dataset.labels, self.config.test_size, self.config.random_state)?;
        let train = dataset.subset(&train_idx);
        let test = dataset.subset(&test_idx);
        info!(
            "Split {} records into {} train / {} test",
            dataset.len(),
            train.len(),
            test.len()
        );

        // Category vocabularies come from every record, scaling statistics
        // from the training split only.
        let preprocessor = Preprocessor::fit(&dataset.records, &train.records)?;
        let train_x = transform_all(&preprocessor, &train.records)?;
        let test_x = transform_all(&preprocessor, &test.records)?;

        let smote = Smote::new(self.config.smote_k_neighbors, self.config.random_state);
        let (balanced_x, balanced_y) = smote.fit_resample(&train_x, &train.labels)?;

        let search = GridSearch::new(
            self.config.param_grid.combinations(),
            self.config.cv_folds,
            self.config.random_state,
        );
        let search_result = search.run(&balanced_x, &balanced_y)?;

        info!("Retraining best model on {} balanced rows", balanced_x.len());
        let model = GbdtClassifier::fit(&search_result.best_params, &balanced_x, &balanced_y)?;

        let probabilities = model.predict_proba(&test_x)?;
        let metrics = EvaluationMetrics::evaluate(&test.labels, &probabilities);
        log_metrics(&metrics);

        let metadata = ModelMetadata::new(
            &preprocessor,
            &metrics,
            search_result.best_params.clone(),
            search_result.best_score,
        );
        let artifacts = ModelArtifacts {
            model,
            preprocessor,
            metadata,
        };
        artifacts.save(&self.config.model_dir)?;

        info!(
            "Training finished in {:.1}s, artifacts in {}",
            started.elapsed().as_secs_f64(),
            self.config.model_dir.display()
        );

        Ok(TrainingReport {
            train_records: train.len(),
            test_records: test.len(),
            balanced_records: balanced_x.len(),
            best_params: search_result.best_params,
            best_cv_score: search_result.best_score,
            metrics,
            model_dir: self.config.model_dir.clone(),
        })
    }
}

fn transform_all(preprocessor: &Preprocessor, records: &[CustomerRecord]) -> Result<Vec<Vec<f64>>> {
    records
        .iter()
        .map(|r| preprocessor.transform(r).map_err(ModelError::from))
        .collect()
}

fn log_metrics(metrics: &EvaluationMetrics) {
    info!("Test set evaluation:");
    info!("  Accuracy:  {:.4}", metrics.accuracy);
    info!("  Precision: {:.4}", metrics.precision);
    info!("  Recall:    {:.4}", metrics.recall);
    info!("  F1 score:  {:.4}", metrics.f1_score);
    info!("  ROC-AUC:   {:.4}", metrics.roc_auc);
    let c = &metrics.confusion;
    info!(
        "  Confusion matrix [[TN {}, FP {}], [FN {}, TP {}]]",
        c.true_negative, c.false_positive, c.false_negative, c.true_positive
    );
}
