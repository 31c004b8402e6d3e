//! Synthetic minority oversampling (SMOTE)
//!
//! New minority rows are drawn on the segment between a random minority
//! row and one of its nearest minority neighbours until both classes have
//! the same count. Only ever applied to training data.

use crate::error::{ModelError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct Smote {
    pub k_neighbors: usize,
    pub seed: u64,
}

impl Default for Smote {
    fn default() -> Self {
        Self {
            k_neighbors: 5,
            seed: 42,
        }
    }
}

impl Smote {
    pub fn new(k_neighbors: usize, seed: u64) -> Self {
        Self { k_neighbors, seed }
    }

    /// Return the balanced rows and labels; originals come first, in order
    pub fn fit_resample(&self, x: &[Vec<f64>], y: &[u8]) -> Result<(Vec<Vec<f64>>, Vec<u8>)> {
        if x.len() != y.len() {
            return Err(ModelError::Training(format!(
                "{} rows but {} labels",
                x.len(),
                y.len()
            )));
        }

        let positives = y.iter().filter(|&&l| l == 1).count();
        let negatives = y.len() - positives;
        let (minority_label, deficit) = if positives < negatives {
            (1u8, negatives - positives)
        } else {
            (0u8, positives - negatives)
        };

        let mut out_x = x.to_vec();
        let mut out_y = y.to_vec();
        if deficit == 0 {
            return Ok((out_x, out_y));
        }

        let minority: Vec<&Vec<f64>> = x
            .iter()
            .zip(y)
            .filter(|(_, label)| **label == minority_label)
            .map(|(row, _)| row)
            .collect();
        if minority.len() < 2 {
            return Err(ModelError::Training(
                "SMOTE needs at least 2 minority samples".to_string(),
            ));
        }

        let k = self.k_neighbors.min(minority.len() - 1);
        let neighbours: Vec<Vec<usize>> = (0..minority.len())
            .into_par_iter()
            .map(|i| nearest(&minority, i, k))
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        for _ in 0..deficit {
            let i = rng.gen_range(0..minority.len());
            let j = neighbours[i][rng.gen_range(0..k)];
            let gap: f64 = rng.gen();
            let synthetic = minority[i]
                .iter()
                .zip(minority[j])
                .map(|(a, b)| a + gap * (b - a))
                .collect();
            out_x.push(synthetic);
            out_y.push(minority_label);
        }

        info!(
            "SMOTE generated {} synthetic samples (class {})",
            deficit, minority_label
        );
        Ok((out_x, out_y))
    }
}

/// Indices of the `k` nearest rows to `rows[i]`, excluding itself
fn nearest(rows: &[&Vec<f64>], i: usize, k: usize) -> Vec<usize> {
    let mut distances: Vec<(f64, usize)> = rows
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(j, other)| (squared_distance(rows[i], other), j))
        .collect();
    distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    distances.into_iter().take(k).map(|(_, j)| j).collect()
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
