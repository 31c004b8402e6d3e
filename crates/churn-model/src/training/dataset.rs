//! Historical customer dataset

use crate::error::{ModelError, Result};
use churn_core::CustomerRecord;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// One CSV row as it appears on disk
///
/// `TotalCharges` is text because the source data leaves it blank for
/// brand-new customers. The identifier column is read and discarded.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "customerID", default)]
    _customer_id: Option<String>,
    gender: String,
    #[serde(rename = "SeniorCitizen")]
    senior_citizen: f64,
    #[serde(rename = "Partner")]
    partner: String,
    #[serde(rename = "Dependents")]
    dependents: String,
    tenure: f64,
    #[serde(rename = "PhoneService")]
    phone_service: String,
    #[serde(rename = "MultipleLines")]
    multiple_lines: String,
    #[serde(rename = "InternetService")]
    internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    online_security: String,
    #[serde(rename = "OnlineBackup")]
    online_backup: String,
    #[serde(rename = "DeviceProtection")]
    device_protection: String,
    #[serde(rename = "TechSupport")]
    tech_support: String,
    #[serde(rename = "StreamingTV")]
    streaming_tv: String,
    #[serde(rename = "StreamingMovies")]
    streaming_movies: String,
    #[serde(rename = "Contract")]
    contract: String,
    #[serde(rename = "PaperlessBilling")]
    paperless_billing: String,
    #[serde(rename = "PaymentMethod")]
    payment_method: String,
    #[serde(rename = "MonthlyCharges")]
    monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    total_charges: String,
    #[serde(rename = "Churn")]
    churn: String,
}

impl RawRow {
    /// `None` when blank or not a number
    fn parsed_total_charges(&self) -> Option<f64> {
        self.total_charges.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn into_labeled(self, line: usize) -> Result<(CustomerRecord, u8)> {
        let label = match self.churn.trim() {
            "Yes" => 1,
            "No" => 0,
            other => {
                return Err(ModelError::Dataset(format!(
                    "row {}: unexpected Churn value '{}'",
                    line, other
                )))
            }
        };

        let total_charges = self.parsed_total_charges().unwrap_or(self.monthly_charges);

        let record = CustomerRecord {
            gender: self.gender,
            senior_citizen: self.senior_citizen,
            partner: self.partner,
            dependents: self.dependents,
            tenure: self.tenure,
            phone_service: self.phone_service,
            multiple_lines: self.multiple_lines,
            internet_service: self.internet_service,
            online_security: self.online_security,
            online_backup: self.online_backup,
            device_protection: self.device_protection,
            tech_support: self.tech_support,
            streaming_tv: self.streaming_tv,
            streaming_movies: self.streaming_movies,
            contract: self.contract,
            paperless_billing: self.paperless_billing,
            payment_method: self.payment_method,
            monthly_charges: self.monthly_charges,
            total_charges,
        };
        Ok((record, label))
    }
}

/// Labeled customer records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<CustomerRecord>,
    /// 1 = churned, 0 = stayed
    pub labels: Vec<u8>,
}

impl Dataset {
    pub fn load_csv(path: &Path) -> Result<Self> {
        info!("Loading dataset from {}", path.display());
        let file = std::fs::File::open(path).map_err(|e| {
            ModelError::Dataset(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut dataset = Dataset::default();
        let mut filled = 0usize;
        for (i, row) in csv_reader.deserialize::<RawRow>().enumerate() {
            let row = row?;
            if row.parsed_total_charges().is_none() {
                filled += 1;
            }
            // header is line 1
            let (record, label) = row.into_labeled(i + 2)?;
            dataset.records.push(record);
            dataset.labels.push(label);
        }

        if dataset.is_empty() {
            return Err(ModelError::Dataset("dataset has no rows".to_string()));
        }
        if filled > 0 {
            warn!(
                "Filled {} blank or non-numeric TotalCharges values with MonthlyCharges",
                filled
            );
        }
        info!(
            "Loaded {} records, churn rate {:.2}%",
            dataset.len(),
            dataset.churn_rate() * 100.0
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn churn_rate(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        self.labels.iter().filter(|&&l| l == 1).count() as f64 / self.labels.len() as f64
    }

    /// Records and labels at the given positions
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
