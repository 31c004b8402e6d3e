//! The fitted feature transform

use super::{EngineeredFeatures, LabelEncoder, StandardScaler};
use crate::error::{Result, TransformError};
use crate::record::CustomerRecord;
use crate::schema::{default_feature_order, scaled_columns, CATEGORICAL_FIELDS};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Encoders, scaler and column order fitted at training time
///
/// Immutable once built. `transform` is a pure function of the record and
/// these fitted objects.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    encoders: BTreeMap<String, LabelEncoder>,
    scaler: StandardScaler,
    feature_names: Vec<String>,
    categorical_columns: Vec<String>,
}

impl Preprocessor {
    pub fn new(
        encoders: BTreeMap<String, LabelEncoder>,
        scaler: StandardScaler,
        feature_names: Vec<String>,
        categorical_columns: Vec<String>,
    ) -> Self {
        Self {
            encoders,
            scaler,
            feature_names,
            categorical_columns,
        }
    }

    /// Fit mode
    ///
    /// Encoders learn their vocabulary from `vocabulary_records`; the scaler
    /// learns its statistics from `scaling_records` only.
    pub fn fit(
        vocabulary_records: &[CustomerRecord],
        scaling_records: &[CustomerRecord],
    ) -> Result<Self> {
        let mut encoders = BTreeMap::new();
        for column in CATEGORICAL_FIELDS {
            let encoder = LabelEncoder::fit(
                column,
                vocabulary_records
                    .iter()
                    .filter_map(|r| r.categorical(column)),
            );
            encoders.insert(column.to_string(), encoder);
        }

        let columns = scaled_columns();
        let rows = scaling_records
            .iter()
            .map(|r| numerical_values(r, &columns))
            .collect::<Result<Vec<_>>>()?;
        let scaler = StandardScaler::fit(columns, &rows)?;

        Ok(Self::new(
            encoders,
            scaler,
            default_feature_order(),
            CATEGORICAL_FIELDS.iter().map(|c| c.to_string()).collect(),
        ))
    }

    pub fn encoders(&self) -> &BTreeMap<String, LabelEncoder> {
        &self.encoders
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    pub fn numerical_columns(&self) -> &[String] {
        self.scaler.columns()
    }

    /// Apply mode: validate an untyped record, then transform it
    pub fn transform_json(&self, value: &Value) -> Result<Vec<f64>> {
        let record = CustomerRecord::from_json(value)?;
        self.transform(&record)
    }

    /// Apply mode: produce the model input vector for a record
    pub fn transform(&self, record: &CustomerRecord) -> Result<Vec<f64>> {
        let mut columns = self.encode_categoricals(record)?;

        let numerical = self.scaler.columns().to_vec();
        let raw = numerical_values(record, &numerical)?;
        let scaled = self.scaler.transform_row(&raw)?;
        columns.extend(numerical.into_iter().zip(scaled));

        self.feature_names
            .iter()
            .map(|name| {
                columns.get(name).copied().ok_or_else(|| {
                    TransformError::SchemaMismatch(format!(
                        "expected feature '{}' was not produced",
                        name
                    ))
                })
            })
            .collect()
    }

    fn encode_categoricals(&self, record: &CustomerRecord) -> Result<HashMap<String, f64>> {
        let mut out = HashMap::with_capacity(self.feature_names.len());
        for column in &self.categorical_columns {
            let encoder = self.encoders.get(column).ok_or_else(|| {
                TransformError::SchemaMismatch(format!("no encoder fitted for '{}'", column))
            })?;
            let value = record.categorical(column).ok_or_else(|| {
                TransformError::SchemaMismatch(format!("unknown categorical column '{}'", column))
            })?;
            out.insert(column.clone(), encoder.encode(value)? as f64);
        }
        Ok(out)
    }
}

/// Unscaled numerical values for `columns`, raw or engineered
///
/// Engineered attributes are derived from the raw record first.
pub fn numerical_values(record: &CustomerRecord, columns: &[String]) -> Result<Vec<f64>> {
    let engineered = EngineeredFeatures::derive(record);
    columns
        .iter()
        .map(|column| {
            record
                .numerical(column)
                .or_else(|| engineered.value(column))
                .ok_or_else(|| {
                    TransformError::SchemaMismatch(format!(
                        "unknown numerical column '{}'",
                        column
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_json() -> Value {
        json!({
            "gender": "Male",
            "SeniorCitizen": 0,
            "Partner": "No",
            "Dependents": "No",
            "tenure": 2,
            "PhoneService": "Yes",
            "MultipleLines": "No",
            "InternetService": "DSL",
            "OnlineSecurity": "Yes",
            "OnlineBackup": "Yes",
            "DeviceProtection": "No",
            "TechSupport": "No",
            "StreamingTV": "No",
            "StreamingMovies": "No",
            "Contract": "Month-to-month",
            "PaperlessBilling": "Yes",
            "PaymentMethod": "Mailed check",
            "MonthlyCharges": 53.85,
            "TotalCharges": 108.15
        })
    }

    fn fitted() -> Preprocessor {
        let a = CustomerRecord::from_json(&record_json()).unwrap();
        let mut b = a.clone();
        b.gender = "Female".to_string();
        b.tenure = 40.0;
        b.contract = "Two year".to_string();
        Preprocessor::fit(&[a.clone(), b.clone()], &[a, b]).unwrap()
    }

    #[test]
    fn test_transform_length_matches_feature_order() {
        let pre = fitted();
        let vector = pre.transform_json(&record_json()).unwrap();
        assert_eq!(vector.len(), pre.feature_names().len());
        assert_eq!(vector.len(), 25);
    }

    #[test]
    fn test_categoricals_encoded_in_place() {
        let pre = fitted();
        let vector = pre.transform_json(&record_json()).unwrap();
        // gender is first; "Male" sorts after "Female"
        assert_eq!(vector[0], 1.0);
        let contract_idx = pre
            .feature_names()
            .iter()
            .position(|n| n == "Contract")
            .unwrap();
        assert_eq!(vector[contract_idx], 0.0);
    }

    #[test]
    fn test_numericals_scaled() {
        let pre = fitted();
        let vector = pre.transform_json(&record_json()).unwrap();
        let tenure_idx = pre
            .feature_names()
            .iter()
            .position(|n| n == "tenure")
            .unwrap();
        // tenure 2 vs fitted {2, 40}: mean 21, std 19
        assert!((vector[tenure_idx] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_category_fails() {
        let pre = fitted();
        let mut value = record_json();
        value["Contract"] = json!("Weekly");
        let err = pre.transform_json(&value).unwrap_err();
        assert!(matches!(err, TransformError::UnknownCategory { .. }));
    }

    #[test]
    fn test_missing_feature_is_schema_mismatch() {
        let pre = fitted();
        let mut names = pre.feature_names().to_vec();
        names.push("CustomerLifetimeValue".to_string());
        let broken = Preprocessor::new(
            pre.encoders().clone(),
            pre.scaler().clone(),
            names,
            pre.categorical_columns().to_vec(),
        );
        let err = broken.transform_json(&record_json()).unwrap_err();
        assert!(matches!(err, TransformError::SchemaMismatch(ref m) if m.contains("CustomerLifetimeValue")));
    }

    #[test]
    fn test_feature_order_is_honoured() {
        let pre = fitted();
        let mut names = pre.feature_names().to_vec();
        names.reverse();
        let reversed = Preprocessor::new(
            pre.encoders().clone(),
            pre.scaler().clone(),
            names,
            pre.categorical_columns().to_vec(),
        );
        let mut forward = pre.transform_json(&record_json()).unwrap();
        let backward = reversed.transform_json(&record_json()).unwrap();
        forward.reverse();
        assert_eq!(forward, backward);
    }
}
