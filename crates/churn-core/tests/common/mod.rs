//! Shared fixtures for churn-core integration tests

use churn_core::CustomerRecord;
use serde_json::{json, Value};

/// A complete, valid record; individual tests override fields
pub fn base_record_json() -> Value {
    json!({
        "gender": "Male",
        "SeniorCitizen": 0,
        "Partner": "No",
        "Dependents": "No",
        "tenure": 2,
        "PhoneService": "Yes",
        "MultipleLines": "No",
        "InternetService": "Fiber optic",
        "OnlineSecurity": "No",
        "OnlineBackup": "No",
        "DeviceProtection": "No",
        "TechSupport": "No",
        "StreamingTV": "No",
        "StreamingMovies": "No",
        "Contract": "Month-to-month",
        "PaperlessBilling": "Yes",
        "PaymentMethod": "Electronic check",
        "MonthlyCharges": 95.0,
        "TotalCharges": 190.0
    })
}

pub fn record_with(overrides: Value) -> CustomerRecord {
    let mut value = base_record_json();
    if let Some(map) = overrides.as_object() {
        for (k, v) in map {
            value[k] = v.clone();
        }
    }
    CustomerRecord::from_json(&value).expect("fixture record must be valid")
}

/// A small but varied training population covering every schema option
pub fn training_population() -> Vec<CustomerRecord> {
    let contracts = ["Month-to-month", "One year", "Two year"];
    let internet = ["DSL", "Fiber optic", "No"];
    let payments = [
        "Electronic check",
        "Mailed check",
        "Bank transfer (automatic)",
        "Credit card (automatic)",
    ];

    let mut records = Vec::new();
    for i in 0..24 {
        let net = internet[i % 3];
        let addon = if net == "No" {
            "No internet service"
        } else if i % 2 == 0 {
            "Yes"
        } else {
            "No"
        };
        let tenure = (i * 3) as f64;
        let monthly = 20.0 + (i as f64) * 4.0;
        records.push(record_with(json!({
            "gender": if i % 2 == 0 { "Male" } else { "Female" },
            "SeniorCitizen": if i % 5 == 0 { 1 } else { 0 },
            "Partner": if i % 3 == 0 { "Yes" } else { "No" },
            "Dependents": if i % 4 == 0 { "Yes" } else { "No" },
            "tenure": tenure,
            "PhoneService": if i % 7 == 0 { "No" } else { "Yes" },
            "MultipleLines": if i % 7 == 0 { "No phone service" } else if i % 2 == 0 { "Yes" } else { "No" },
            "InternetService": net,
            "OnlineSecurity": addon,
            "OnlineBackup": addon,
            "DeviceProtection": addon,
            "TechSupport": addon,
            "StreamingTV": addon,
            "StreamingMovies": addon,
            "Contract": contracts[i % 3],
            "PaperlessBilling": if i % 2 == 0 { "Yes" } else { "No" },
            "PaymentMethod": payments[i % 4],
            "MonthlyCharges": monthly,
            "TotalCharges": monthly * tenure
        })));
    }
    records
}
