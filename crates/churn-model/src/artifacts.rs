//! Persisted model artifacts
//!
//! Training writes, and the server reads, five JSON files with fixed names
//! inside one directory. They are only ever loaded together.

use crate::classifier::{GbdtClassifier, GbdtParams};
use crate::error::{ModelError, Result};
use crate::metrics::EvaluationMetrics;
use churn_core::{LabelEncoder, Preprocessor, StandardScaler};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const MODEL_FILE: &str = "churn_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const ENCODERS_FILE: &str = "label_encoders.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";
pub const METADATA_FILE: &str = "model_metadata.json";

/// Every artifact file name, in load order
pub const ARTIFACT_FILES: [&str; 5] = [
    MODEL_FILE,
    SCALER_FILE,
    ENCODERS_FILE,
    FEATURE_NAMES_FILE,
    METADATA_FILE,
];

/// Training-time description of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_name: String,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub roc_auc: f64,
    pub categorical_columns: Vec<String>,
    pub numerical_columns: Vec<String>,
    pub best_params: GbdtParams,
    #[serde(default)]
    pub best_cv_score: Option<f64>,
    #[serde(default)]
    pub trained_at: Option<String>,
}

impl ModelMetadata {
    pub fn new(
        preprocessor: &Preprocessor,
        metrics: &EvaluationMetrics,
        best_params: GbdtParams,
        best_cv_score: f64,
    ) -> Self {
        Self {
            model_name: "GBDT (Tuned)".to_string(),
            accuracy: metrics.accuracy,
            precision: metrics.precision,
            recall: metrics.recall,
            f1_score: metrics.f1_score,
            roc_auc: metrics.roc_auc,
            categorical_columns: preprocessor.categorical_columns().to_vec(),
            numerical_columns: preprocessor.numerical_columns().to_vec(),
            best_params,
            best_cv_score: Some(best_cv_score),
            trained_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }
}

/// The full artifact set needed for inference
pub struct ModelArtifacts {
    pub model: GbdtClassifier,
    pub preprocessor: Preprocessor,
    pub metadata: ModelMetadata,
}

impl ModelArtifacts {
    /// Load all five artifacts from `dir`
    ///
    /// Fails on the first artifact that is missing or malformed, or when
    /// the pieces disagree with one another.
    pub fn load(dir: &Path) -> Result<Self> {
        info!("Loading model artifacts from {}", dir.display());

        let model = GbdtClassifier::load(&dir.join(MODEL_FILE)).map_err(|e| match e {
            ModelError::ArtifactLoad { reason, .. } => ModelError::ArtifactLoad {
                artifact: MODEL_FILE.to_string(),
                reason,
            },
            other => other,
        })?;
        let scaler: StandardScaler = read_json(dir, SCALER_FILE)?;
        let encoders: BTreeMap<String, LabelEncoder> = read_json(dir, ENCODERS_FILE)?;
        let feature_names: Vec<String> = read_json(dir, FEATURE_NAMES_FILE)?;
        let metadata: ModelMetadata = read_json(dir, METADATA_FILE)?;

        if metadata.numerical_columns != scaler.columns() {
            return Err(ModelError::ArtifactLoad {
                artifact: SCALER_FILE.to_string(),
                reason: "scaler columns do not match metadata numerical columns".to_string(),
            });
        }
        if let Some(missing) = metadata
            .categorical_columns
            .iter()
            .find(|c| !encoders.contains_key(*c))
        {
            return Err(ModelError::ArtifactLoad {
                artifact: ENCODERS_FILE.to_string(),
                reason: format!("no encoder for categorical column '{}'", missing),
            });
        }

        debug!(
            "Loaded {} features ({} categorical, {} numerical)",
            feature_names.len(),
            metadata.categorical_columns.len(),
            metadata.numerical_columns.len()
        );

        let preprocessor = Preprocessor::new(
            encoders,
            scaler,
            feature_names,
            metadata.categorical_columns.clone(),
        );

        Ok(Self {
            model,
            preprocessor,
            metadata,
        })
    }

    /// Write all five artifacts into `dir`, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;

        self.model.save(&dir.join(MODEL_FILE))?;
        info!("✓ Model saved");
        write_json(dir, SCALER_FILE, self.preprocessor.scaler())?;
        info!("✓ Scaler saved");
        write_json(dir, ENCODERS_FILE, self.preprocessor.encoders())?;
        info!("✓ Label encoders saved");
        write_json(dir, FEATURE_NAMES_FILE, self.preprocessor.feature_names())?;
        info!("✓ Feature names saved");
        write_json(dir, METADATA_FILE, &self.metadata)?;
        info!("✓ Model metadata saved");

        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let load_err = |reason: String| ModelError::ArtifactLoad {
        artifact: name.to_string(),
        reason,
    };
    let content = fs::read_to_string(dir.join(name)).map_err(|e| load_err(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| load_err(e.to_string()))
}

fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> Result<()> {
    let save_err = |reason: String| ModelError::ArtifactSave {
        artifact: name.to_string(),
        reason,
    };
    let content = serde_json::to_string_pretty(value).map_err(|e| save_err(e.to_string()))?;
    fs::write(dir.join(name), content).map_err(|e| save_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_file_names_are_distinct() {
        let mut names = ARTIFACT_FILES.to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_load_from_empty_dir_fails_on_model() {
        let dir = TempDir::new().unwrap();
        match ModelArtifacts::load(dir.path()) {
            Err(ModelError::ArtifactLoad { artifact, .. }) => assert_eq!(artifact, MODEL_FILE),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("load should fail"),
        }
    }

    #[test]
    fn test_read_json_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FEATURE_NAMES_FILE), "{not json").unwrap();
        let err = read_json::<Vec<String>>(dir.path(), FEATURE_NAMES_FILE).unwrap_err();
        assert!(err.to_string().contains(FEATURE_NAMES_FILE));
    }

    #[test]
    fn test_metadata_optional_fields_default() {
        let json = serde_json::json!({
            "model_name": "GBDT",
            "accuracy": 0.8,
            "precision": 0.6,
            "recall": 0.7,
            "f1_score": 0.65,
            "roc_auc": 0.85,
            "categorical_columns": ["gender"],
            "numerical_columns": ["tenure"],
            "best_params": {
                "n_estimators": 100,
                "max_depth": 3,
                "learning_rate": 0.1,
                "subsample": 0.8,
                "colsample_bytree": 1.0
            }
        });
        let metadata: ModelMetadata = serde_json::from_value(json).unwrap();
        assert!(metadata.best_cv_score.is_none());
        assert!(metadata.trained_at.is_none());
        assert_eq!(metadata.best_params.subsample, 0.8);
    }
}
