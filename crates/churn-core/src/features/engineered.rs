//! Attributes derived from the raw record

use crate::record::CustomerRecord;
use crate::schema::{ADDON_FIELDS, SERVICE_FIELDS, STREAMING_FIELDS};
use serde::Serialize;

/// Engineered attributes computed on raw (unencoded) values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EngineeredFeatures {
    pub avg_monthly_charges: f64,
    pub charge_increase: u8,
    pub total_services: u8,
    pub has_addon_service: u8,
    pub has_streaming_service: u8,
    pub senior_with_partner: u8,
}

impl EngineeredFeatures {
    pub fn derive(record: &CustomerRecord) -> Self {
        let avg_monthly_charges = record.avg_monthly_charges();
        let total_services = SERVICE_FIELDS.iter().filter(|f| record.is_yes(f)).count();

        Self {
            avg_monthly_charges,
            charge_increase: u8::from(record.monthly_charges > avg_monthly_charges),
            total_services: total_services as u8,
            has_addon_service: u8::from(ADDON_FIELDS.iter().any(|f| record.is_yes(f))),
            has_streaming_service: u8::from(STREAMING_FIELDS.iter().any(|f| record.is_yes(f))),
            senior_with_partner: u8::from(record.is_senior() && record.is_yes("Partner")),
        }
    }

    /// Look up an engineered column by name
    pub fn value(&self, name: &str) -> Option<f64> {
        match name {
            "AvgMonthlyCharges" => Some(self.avg_monthly_charges),
            "ChargeIncrease" => Some(f64::from(self.charge_increase)),
            "TotalServices" => Some(f64::from(self.total_services)),
            "HasAddonService" => Some(f64::from(self.has_addon_service)),
            "HasStreamingService" => Some(f64::from(self.has_streaming_service)),
            "SeniorWithPartner" => Some(f64::from(self.senior_with_partner)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ENGINEERED_COLUMNS;
    use serde_json::json;

    fn record(overrides: serde_json::Value) -> CustomerRecord {
        let mut base = json!({
            "gender": "Male",
            "SeniorCitizen": 0,
            "Partner": "No",
            "Dependents": "No",
            "tenure": 10,
            "PhoneService": "Yes",
            "MultipleLines": "No",
            "InternetService": "Fiber optic",
            "OnlineSecurity": "No",
            "OnlineBackup": "No",
            "DeviceProtection": "No",
            "TechSupport": "No",
            "StreamingTV": "No",
            "StreamingMovies": "No",
            "Contract": "One year",
            "PaperlessBilling": "Yes",
            "PaymentMethod": "Mailed check",
            "MonthlyCharges": 70.0,
            "TotalCharges": 700.0
        });
        for (k, v) in overrides.as_object().unwrap() {
            base[k] = v.clone();
        }
        CustomerRecord::from_json(&base).unwrap()
    }

    #[test]
    fn test_avg_and_charge_increase() {
        // 700 / 11 = 63.6 < 70
        let f = EngineeredFeatures::derive(&record(json!({})));
        assert!((f.avg_monthly_charges - 700.0 / 11.0).abs() < 1e-9);
        assert_eq!(f.charge_increase, 1);

        let f = EngineeredFeatures::derive(&record(json!({"TotalCharges": 1100.0})));
        assert_eq!(f.charge_increase, 0);
    }

    #[test]
    fn test_zero_tenure_is_finite() {
        let f = EngineeredFeatures::derive(&record(json!({"tenure": 0, "TotalCharges": 0.0})));
        assert!(f.avg_monthly_charges.is_finite());
        assert_eq!(f.avg_monthly_charges, 0.0);
    }

    #[test]
    fn test_service_counts_ignore_non_yes_values() {
        // InternetService is "Fiber optic", never "Yes", so it does not count
        let f = EngineeredFeatures::derive(&record(json!({
            "OnlineBackup": "Yes",
            "StreamingMovies": "Yes",
            "MultipleLines": "No phone service"
        })));
        assert_eq!(f.total_services, 3);
        assert_eq!(f.has_addon_service, 1);
        assert_eq!(f.has_streaming_service, 1);
    }

    #[test]
    fn test_no_services() {
        let f = EngineeredFeatures::derive(&record(json!({"PhoneService": "No"})));
        assert_eq!(f.total_services, 0);
        assert_eq!(f.has_addon_service, 0);
        assert_eq!(f.has_streaming_service, 0);
    }

    #[test]
    fn test_senior_with_partner() {
        let f = EngineeredFeatures::derive(&record(json!({"SeniorCitizen": 1, "Partner": "Yes"})));
        assert_eq!(f.senior_with_partner, 1);
        let f = EngineeredFeatures::derive(&record(json!({"SeniorCitizen": 1})));
        assert_eq!(f.senior_with_partner, 0);
        let f = EngineeredFeatures::derive(&record(json!({"Partner": "Yes"})));
        assert_eq!(f.senior_with_partner, 0);
    }

    #[test]
    fn test_value_lookup_covers_all_columns() {
        let f = EngineeredFeatures::derive(&record(json!({})));
        for column in ENGINEERED_COLUMNS {
            assert!(f.value(column).is_some(), "missing {}", column);
        }
        assert!(f.value("tenure").is_none());
    }
}
