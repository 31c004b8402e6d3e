//! Training configuration

use crate::classifier::GbdtParams;
use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hyperparameter lattice searched by cross-validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    pub n_estimators: Vec<usize>,
    pub max_depth: Vec<u32>,
    pub learning_rate: Vec<f32>,
    pub subsample: Vec<f64>,
    pub colsample_bytree: Vec<f64>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            n_estimators: vec![100, 200, 300],
            max_depth: vec![3, 5, 7],
            learning_rate: vec![0.01, 0.1, 0.3],
            subsample: vec![0.8, 0.9, 1.0],
            colsample_bytree: vec![0.8, 0.9, 1.0],
        }
    }
}

impl ParamGrid {
    /// Every point of the lattice
    pub fn combinations(&self) -> Vec<GbdtParams> {
        let mut out = Vec::with_capacity(self.len());
        for &n_estimators in &self.n_estimators {
            for &max_depth in &self.max_depth {
                for &learning_rate in &self.learning_rate {
                    for &subsample in &self.subsample {
                        for &colsample_bytree in &self.colsample_bytree {
                            out.push(GbdtParams {
                                n_estimators,
                                max_depth,
                                learning_rate,
                                subsample,
                                colsample_bytree,
                            });
                        }
                    }
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.n_estimators.len()
            * self.max_depth.len()
            * self.learning_rate.len()
            * self.subsample.len()
            * self.colsample_bytree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Training run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Historical dataset (CSV)
    pub data_path: PathBuf,

    /// Output directory for artifacts
    pub model_dir: PathBuf,

    /// Fraction of records held out for evaluation
    pub test_size: f64,

    /// Seed for splitting, oversampling and fold assignment
    pub random_state: u64,

    /// Neighbours considered when synthesising minority samples
    pub smote_k_neighbors: usize,

    /// Cross-validation folds per lattice point
    pub cv_folds: usize,

    pub param_grid: ParamGrid,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("../data/telco_churn.csv"),
            model_dir: PathBuf::from("./models"),
            test_size: 0.2,
            random_state: 42,
            smote_k_neighbors: 5,
            cv_folds: 5,
            param_grid: ParamGrid::default(),
        }
    }
}

impl TrainingConfig {
    /// Load from a YAML file; missing keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ModelError::Config(format!("invalid training config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ModelError::Config(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if self.cv_folds < 2 {
            return Err(ModelError::Config("cv_folds must be at least 2".to_string()));
        }
        if self.smote_k_neighbors == 0 {
            return Err(ModelError::Config(
                "smote_k_neighbors must be at least 1".to_string(),
            ));
        }
        if self.param_grid.is_empty() {
            return Err(ModelError::Config("param_grid is empty".to_string()));
        }
        Ok(())
    }
}
