//! Typed customer record and its validation

use crate::error::{Result, TransformError};
use crate::schema::{CATEGORICAL_FIELDS, NUMERICAL_FIELDS};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A customer's account and service attributes
///
/// Serialized field names match the dataset columns and the JSON keys
/// accepted by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub gender: String,
    #[serde(rename = "SeniorCitizen")]
    pub senior_citizen: f64,
    #[serde(rename = "Partner")]
    pub partner: String,
    #[serde(rename = "Dependents")]
    pub dependents: String,
    pub tenure: f64,
    #[serde(rename = "PhoneService")]
    pub phone_service: String,
    #[serde(rename = "MultipleLines")]
    pub multiple_lines: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "DeviceProtection")]
    pub device_protection: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    pub streaming_movies: String,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
}

impl CustomerRecord {
    /// Validate an untyped JSON record and build a typed one
    ///
    /// Every field in the schema must be present: categorical fields as
    /// strings, numerical fields as numbers. `null` counts as missing.
    /// Unknown extra keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            TransformError::Validation("customer record must be a JSON object".to_string())
        })?;

        // Check the whole schema up front so the first offending field is
        // reported in schema order.
        for field in CATEGORICAL_FIELDS {
            text_field(obj, field)?;
        }
        for field in NUMERICAL_FIELDS {
            number_field(obj, field)?;
        }
        let tenure = number_field(obj, "tenure")?;
        if tenure < 0.0 {
            return Err(TransformError::InvalidFieldType {
                field: "tenure".to_string(),
                expected: "non-negative number".to_string(),
            });
        }

        Ok(Self {
            gender: text_field(obj, "gender")?,
            senior_citizen: number_field(obj, "SeniorCitizen")?,
            partner: text_field(obj, "Partner")?,
            dependents: text_field(obj, "Dependents")?,
            tenure,
            phone_service: text_field(obj, "PhoneService")?,
            multiple_lines: text_field(obj, "MultipleLines")?,
            internet_service: text_field(obj, "InternetService")?,
            online_security: text_field(obj, "OnlineSecurity")?,
            online_backup: text_field(obj, "OnlineBackup")?,
            device_protection: text_field(obj, "DeviceProtection")?,
            tech_support: text_field(obj, "TechSupport")?,
            streaming_tv: text_field(obj, "StreamingTV")?,
            streaming_movies: text_field(obj, "StreamingMovies")?,
            contract: text_field(obj, "Contract")?,
            paperless_billing: text_field(obj, "PaperlessBilling")?,
            payment_method: text_field(obj, "PaymentMethod")?,
            monthly_charges: number_field(obj, "MonthlyCharges")?,
            total_charges: number_field(obj, "TotalCharges")?,
        })
    }

    /// Look up a categorical field by its column name
    pub fn categorical(&self, name: &str) -> Option<&str> {
        let value = match name {
            "gender" => &self.gender,
            "Partner" => &self.partner,
            "Dependents" => &self.dependents,
            "PhoneService" => &self.phone_service,
            "MultipleLines" => &self.multiple_lines,
            "InternetService" => &self.internet_service,
            "OnlineSecurity" => &self.online_security,
            "OnlineBackup" => &self.online_backup,
            "DeviceProtection" => &self.device_protection,
            "TechSupport" => &self.tech_support,
            "StreamingTV" => &self.streaming_tv,
            "StreamingMovies" => &self.streaming_movies,
            "Contract" => &self.contract,
            "PaperlessBilling" => &self.paperless_billing,
            "PaymentMethod" => &self.payment_method,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Look up a raw numerical field by its column name
    pub fn numerical(&self, name: &str) -> Option<f64> {
        match name {
            "SeniorCitizen" => Some(self.senior_citizen),
            "tenure" => Some(self.tenure),
            "MonthlyCharges" => Some(self.monthly_charges),
            "TotalCharges" => Some(self.total_charges),
            _ => None,
        }
    }

    /// Whether a categorical field equals "Yes"
    pub fn is_yes(&self, name: &str) -> bool {
        self.categorical(name) == Some("Yes")
    }

    pub fn is_senior(&self) -> bool {
        self.senior_citizen == 1.0
    }

    /// Average charge per month of tenure; the +1 keeps zero-tenure customers finite
    pub fn avg_monthly_charges(&self) -> f64 {
        self.total_charges / (self.tenure + 1.0)
    }
}

fn text_field(obj: &Map<String, Value>, field: &str) -> Result<String> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(TransformError::MissingField(field.to_string())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(TransformError::InvalidFieldType {
            field: field.to_string(),
            expected: "string".to_string(),
        }),
    }
}

fn number_field(obj: &Map<String, Value>, field: &str) -> Result<f64> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(TransformError::MissingField(field.to_string())),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| TransformError::InvalidFieldType {
                field: field.to_string(),
                expected: "finite number".to_string(),
            }),
        Some(_) => Err(TransformError::InvalidFieldType {
            field: field.to_string(),
            expected: "number".to_string(),
        }),
    }
}
