//! Standard (z-score) scaling of numerical columns

use crate::error::{Result, TransformError};
use serde::{Deserialize, Serialize};

/// Per-column mean/standard-deviation scaler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Fit on rows whose values follow `columns` order
    ///
    /// Uses the population standard deviation. Constant columns get a scale
    /// of 1.0 so they transform to zero instead of dividing by zero.
    pub fn fit(columns: Vec<String>, rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(TransformError::Validation(
                "cannot fit scaler on an empty dataset".to_string(),
            ));
        }
        let width = columns.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(TransformError::SchemaMismatch(format!(
                "scaler expects {} columns, got a row with {}",
                width,
                bad.len()
            )));
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0; width];
        for row in rows {
            for ((acc, v), m) in var.iter_mut().zip(row).zip(&mean) {
                let d = v - m;
                *acc += d * d;
            }
        }
        let scale = var
            .into_iter()
            .map(|v| {
                let std = (v / n).sqrt();
                if std == 0.0 {
                    1.0
                } else {
                    std
                }
            })
            .collect();

        Ok(Self {
            columns,
            mean,
            scale,
        })
    }

    /// Build a scaler from already-fitted statistics
    pub fn from_parts(columns: Vec<String>, mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if columns.len() != mean.len() || columns.len() != scale.len() {
            return Err(TransformError::SchemaMismatch(format!(
                "scaler has {} columns but {} means and {} scales",
                columns.len(),
                mean.len(),
                scale.len()
            )));
        }
        Ok(Self {
            columns,
            mean,
            scale,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Scale a single value of a named column
    pub fn transform_value(&self, column: &str, value: f64) -> Result<f64> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| {
                TransformError::SchemaMismatch(format!("scaler was not fitted on '{}'", column))
            })?;
        Ok((value - self.mean[idx]) / self.scale[idx])
    }

    /// Scale a full row in `columns` order
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.columns.len() {
            return Err(TransformError::SchemaMismatch(format!(
                "scaler expects {} values, got {}",
                self.columns.len(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fit_population_std() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0]];
        let scaler = StandardScaler::fit(cols(&["a", "b"]), &rows).unwrap();
        assert_eq!(scaler.mean(), &[2.0, 10.0]);
        assert_eq!(scaler.scale()[0], 1.0);
        // constant column
        assert_eq!(scaler.scale()[1], 1.0);
    }

    #[test]
    fn test_transform_row_z_score() {
        let rows = vec![vec![0.0], vec![4.0]];
        let scaler = StandardScaler::fit(cols(&["tenure"]), &rows).unwrap();
        let out = scaler.transform_row(&[4.0]).unwrap();
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((scaler.transform_value("tenure", 0.0).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let rows = vec![vec![5.0], vec![5.0], vec![5.0]];
        let scaler = StandardScaler::fit(cols(&["x"]), &rows).unwrap();
        assert_eq!(scaler.transform_value("x", 5.0).unwrap(), 0.0);
    }

    #[test]
    fn test_fit_empty_rejected() {
        assert!(StandardScaler::fit(cols(&["x"]), &[]).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![1.0]];
        let err = StandardScaler::fit(cols(&["a", "b"]), &rows).unwrap_err();
        assert!(matches!(err, TransformError::SchemaMismatch(_)));
    }

    #[test]
    fn test_unknown_column() {
        let scaler = StandardScaler::fit(cols(&["x"]), &[vec![1.0]]).unwrap();
        assert!(scaler.transform_value("y", 1.0).is_err());
    }

    #[test]
    fn test_from_parts_length_check() {
        assert!(StandardScaler::from_parts(cols(&["a"]), vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(StandardScaler::from_parts(cols(&["a"]), vec![0.0], vec![1.0]).is_ok());
    }
}
