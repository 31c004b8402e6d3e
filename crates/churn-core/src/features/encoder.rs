//! Label encoding of categorical fields

use crate::error::{Result, TransformError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maps a categorical column's training vocabulary to integer codes
///
/// The vocabulary is kept sorted; a value's code is its index. Values not
/// seen at fit time are rejected, there is no fallback bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    column: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit an encoder on every observed value of a column
    pub fn fit<'a, I>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: BTreeSet<&str> = values.into_iter().collect();
        Self {
            column: column.into(),
            classes: classes.into_iter().map(str::to_string).collect(),
        }
    }

    /// Rebuild an encoder from a known vocabulary
    pub fn from_classes(column: impl Into<String>, mut classes: Vec<String>) -> Self {
        classes.sort();
        classes.dedup();
        Self {
            column: column.into(),
            classes,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, value: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .map_err(|_| TransformError::UnknownCategory {
                field: self.column.clone(),
                value: value.to_string(),
            })
    }

    pub fn decode(&self, code: usize) -> Result<&str> {
        self.classes.get(code).map(String::as_str).ok_or_else(|| {
            TransformError::SchemaMismatch(format!(
                "code {} out of range for column '{}' ({} classes)",
                code,
                self.column,
                self.classes.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_sorts_and_dedups() {
        let enc = LabelEncoder::fit("Contract", ["Two year", "Month-to-month", "One year", "Two year"]);
        assert_eq!(enc.classes(), &["Month-to-month", "One year", "Two year"]);
        assert_eq!(enc.column(), "Contract");
    }

    #[test]
    fn test_encode_uses_sorted_index() {
        let enc = LabelEncoder::fit("InternetService", ["No", "Fiber optic", "DSL"]);
        assert_eq!(enc.encode("DSL").unwrap(), 0);
        assert_eq!(enc.encode("Fiber optic").unwrap(), 1);
        assert_eq!(enc.encode("No").unwrap(), 2);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let enc = LabelEncoder::fit("PaymentMethod", ["Electronic check", "Mailed check"]);
        for value in ["Electronic check", "Mailed check"] {
            let code = enc.encode(value).unwrap();
            assert_eq!(enc.decode(code).unwrap(), value);
        }
    }

    #[test]
    fn test_unseen_value_rejected() {
        let enc = LabelEncoder::fit("gender", ["Male", "Female"]);
        let err = enc.encode("Unknown").unwrap_err();
        assert_eq!(
            err,
            TransformError::UnknownCategory {
                field: "gender".to_string(),
                value: "Unknown".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_out_of_range() {
        let enc = LabelEncoder::fit("gender", ["Male", "Female"]);
        assert!(enc.decode(2).is_err());
    }

    #[test]
    fn test_from_classes_matches_fit() {
        let fitted = LabelEncoder::fit("Partner", ["Yes", "No"]);
        let rebuilt = LabelEncoder::from_classes("Partner", vec!["Yes".into(), "No".into()]);
        assert_eq!(fitted, rebuilt);
    }
}
