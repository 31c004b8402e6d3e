//! Cross-validated hyperparameter search

use super::split::stratified_kfold;
use crate::classifier::{ChurnClassifier, GbdtClassifier, GbdtParams};
use crate::error::{ModelError, Result};
use crate::metrics::roc_auc;
use rayon::prelude::*;
use tracing::{debug, info};

/// Mean validation ROC-AUC for one lattice point
#[derive(Debug, Clone, PartialEq)]
pub struct ParamScore {
    pub params: GbdtParams,
    pub mean_roc_auc: f64,
}

#[derive(Debug, Clone)]
pub struct GridSearchResult {
    pub best_params: GbdtParams,
    pub best_score: f64,
    /// Every evaluated point, in lattice order
    pub scores: Vec<ParamScore>,
}

/// Exhaustive search over candidate parameters using stratified k-fold
/// cross-validation; candidates are evaluated in parallel
pub struct GridSearch {
    candidates: Vec<GbdtParams>,
    folds: usize,
    seed: u64,
}

impl GridSearch {
    pub fn new(candidates: Vec<GbdtParams>, folds: usize, seed: u64) -> Self {
        Self {
            candidates,
            folds,
            seed,
        }
    }

    pub fn run(&self, x: &[Vec<f64>], y: &[u8]) -> Result<GridSearchResult> {
        if self.candidates.is_empty() {
            return Err(ModelError::Training("no parameter candidates".to_string()));
        }
        let folds = stratified_kfold(y, self.folds, self.seed)?;
        info!(
            "Grid search: {} candidates x {} folds",
            self.candidates.len(),
            folds.len()
        );

        let scores = self
            .candidates
            .par_iter()
            .map(|params| {
                let mean_roc_auc = cross_validate(params, x, y, &folds)?;
                debug!("{:?} -> ROC-AUC {:.4}", params, mean_roc_auc);
                Ok(ParamScore {
                    params: params.clone(),
                    mean_roc_auc,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // first candidate wins ties
        let best = scores
            .iter()
            .fold(None::<&ParamScore>, |best, s| match best {
                Some(b) if b.mean_roc_auc >= s.mean_roc_auc => Some(b),
                _ => Some(s),
            })
            .ok_or_else(|| ModelError::Training("grid search produced no scores".to_string()))?;

        let (best_params, best_score) = (best.params.clone(), best.mean_roc_auc);
        info!(
            "Best parameters: {:?} (CV ROC-AUC {:.4})",
            best_params, best_score
        );

        Ok(GridSearchResult {
            best_params,
            best_score,
            scores,
        })
    }
}

fn cross_validate(
    params: &GbdtParams,
    x: &[Vec<f64>],
    y: &[u8],
    folds: &[(Vec<usize>, Vec<usize>)],
) -> Result<f64> {
    let mut total = 0.0;
    for (train, validation) in folds {
        let train_x: Vec<Vec<f64>> = train.iter().map(|&i| x[i].clone()).collect();
        let train_y: Vec<u8> = train.iter().map(|&i| y[i]).collect();
        let val_x: Vec<Vec<f64>> = validation.iter().map(|&i| x[i].clone()).collect();
        let val_y: Vec<u8> = validation.iter().map(|&i| y[i]).collect();

        let model = GbdtClassifier::fit(params, &train_x, &train_y)?;
        let probabilities = model.predict_proba(&val_x)?;
        total += roc_auc(&val_y, &probabilities);
    }
    Ok(total / folds.len() as f64)
}
