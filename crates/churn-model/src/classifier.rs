//! Classifier seam and the gradient-boosted implementation

use crate::error::{ModelError, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::gradient_boost::GBDT;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A binary classifier over fully transformed feature vectors
///
/// Implementations are read-only after construction so a single instance
/// can be shared by every request.
pub trait ChurnClassifier: Send + Sync {
    /// Probability of churn for each row
    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Hyperparameters of the boosted ensemble
///
/// Names follow the usual gradient-boosting vocabulary so persisted
/// metadata reads the same as other tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbdtParams {
    /// Number of boosting rounds
    pub n_estimators: usize,
    pub max_depth: u32,
    pub learning_rate: f32,
    /// Fraction of rows sampled per tree
    pub subsample: f64,
    /// Fraction of features sampled per tree
    pub colsample_bytree: f64,
}

impl Default for GbdtParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 3,
            learning_rate: 0.1,
            subsample: 1.0,
            colsample_bytree: 1.0,
        }
    }
}

impl GbdtParams {
    fn to_config(&self, feature_size: usize) -> Config {
        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_iterations(self.n_estimators);
        config.set_max_depth(self.max_depth);
        config.set_shrinkage(self.learning_rate);
        config.set_data_sample_ratio(self.subsample);
        config.set_feature_sample_ratio(self.colsample_bytree);
        config.set_min_leaf_size(1);
        config.set_training_optimization_level(2);
        config.set_debug(false);
        config.set_loss("LogLikelyhood");
        config
    }
}

/// Gradient Boosting Decision Tree (GBDT) churn classifier
pub struct GbdtClassifier {
    model: GBDT,
}

impl GbdtClassifier {
    /// Train on rows `x` with labels `y` (1 = churn, 0 = stays)
    pub fn fit(params: &GbdtParams, x: &[Vec<f64>], y: &[u8]) -> Result<Self> {
        if x.is_empty() {
            return Err(ModelError::Training("no training rows".to_string()));
        }
        if x.len() != y.len() {
            return Err(ModelError::Training(format!(
                "{} rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        let feature_size = x[0].len();
        if x.iter().any(|row| row.len() != feature_size) {
            return Err(ModelError::Training("ragged feature matrix".to_string()));
        }
        if !y.contains(&0) || !y.contains(&1) {
            return Err(ModelError::Training(
                "training labels must contain both classes".to_string(),
            ));
        }

        let config = params.to_config(feature_size);
        let mut model = GBDT::new(&config);

        // The log-likelihood loss expects labels in {-1, 1}
        let mut train_x: DataVec = x
            .iter()
            .zip(y)
            .map(|(row, &label)| {
                let target = if label == 1 { 1.0 } else { -1.0 };
                Data::new_training_data(to_values(row), 1.0, target, None)
            })
            .collect();

        model.fit(&mut train_x);

        Ok(Self { model })
    }

    /// Read a model written by [`GbdtClassifier::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let model = GBDT::load_model(&path.to_string_lossy()).map_err(|e| {
            ModelError::ArtifactLoad {
                artifact: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { model })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.model
            .save_model(&path.to_string_lossy())
            .map_err(|e| ModelError::ArtifactSave {
                artifact: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

impl ChurnClassifier for GbdtClassifier {
    fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let test_x: DataVec = rows
            .iter()
            .map(|row| Data::new_test_data(to_values(row), None))
            .collect();
        let predictions = self.model.predict(&test_x);
        if predictions.len() != rows.len() {
            return Err(ModelError::Prediction(format!(
                "model returned {} scores for {} rows",
                predictions.len(),
                rows.len()
            )));
        }
        Ok(predictions
            .into_iter()
            .map(|p| f64::from(p).clamp(0.0, 1.0))
            .collect())
    }

    fn name(&self) -> &str {
        "GBDT"
    }
}

fn to_values(row: &[f64]) -> Vec<ValueType> {
    row.iter().map(|&v| v as ValueType).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..40 {
            let label = (i % 2) as u8;
            let signal = if label == 1 { 2.0 } else { -2.0 };
            x.push(vec![signal + (i as f64) * 0.01, (i % 5) as f64]);
            y.push(label);
        }
        (x, y)
    }

    fn quick_params() -> GbdtParams {
        GbdtParams {
            n_estimators: 20,
            max_depth: 3,
            learning_rate: 0.3,
            subsample: 1.0,
            colsample_bytree: 1.0,
        }
    }

    #[test]
    fn test_fit_and_predict_separable() {
        let (x, y) = separable();
        let model = GbdtClassifier::fit(&quick_params(), &x, &y).unwrap();
        let probs = model.predict_proba(&x).unwrap();
        assert_eq!(probs.len(), x.len());
        for (p, label) in probs.iter().zip(&y) {
            assert!((0.0..=1.0).contains(p));
            if *label == 1 {
                assert!(*p > 0.5, "churner scored {}", p);
            } else {
                assert!(*p < 0.5, "stayer scored {}", p);
            }
        }
    }

    #[test]
    fn test_fit_rejects_single_class() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![1, 1];
        assert!(GbdtClassifier::fit(&quick_params(), &x, &y).is_err());
    }

    #[test]
    fn test_fit_rejects_length_mismatch() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![1];
        assert!(GbdtClassifier::fit(&quick_params(), &x, &y).is_err());
    }

    #[test]
    fn test_predict_empty() {
        let (x, y) = separable();
        let model = GbdtClassifier::fit(&quick_params(), &x, &y).unwrap();
        assert!(model.predict_proba(&[]).unwrap().is_empty());
        assert_eq!(model.name(), "GBDT");
    }

    #[test]
    fn test_default_params() {
        let params = GbdtParams::default();
        assert_eq!(params.n_estimators, 100);
        assert_eq!(params.max_depth, 3);
    }
}
