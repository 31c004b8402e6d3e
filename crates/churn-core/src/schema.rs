//! Customer record schema
//!
//! Field names are part of the API and artifact contract: they match the
//! column names of the historical dataset and the JSON keys clients send.

/// Categorical input fields, in dataset column order
pub const CATEGORICAL_FIELDS: [&str; 15] = [
    "gender",
    "Partner",
    "Dependents",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaperlessBilling",
    "PaymentMethod",
];

/// Numerical input fields, in dataset column order
pub const NUMERICAL_FIELDS: [&str; 4] = ["SeniorCitizen", "tenure", "MonthlyCharges", "TotalCharges"];

/// Raw input columns in dataset order
pub const RAW_COLUMNS: [&str; 19] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "tenure",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaperlessBilling",
    "PaymentMethod",
    "MonthlyCharges",
    "TotalCharges",
];

/// Engineered columns, in derivation order
pub const ENGINEERED_COLUMNS: [&str; 6] = [
    "AvgMonthlyCharges",
    "ChargeIncrease",
    "TotalServices",
    "HasAddonService",
    "HasStreamingService",
    "SeniorWithPartner",
];

/// Service flags counted by `TotalServices`
pub const SERVICE_FIELDS: [&str; 9] = [
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
];

/// Add-on services checked by `HasAddonService`
pub const ADDON_FIELDS: [&str; 4] = [
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
];

/// Streaming services checked by `HasStreamingService`
pub const STREAMING_FIELDS: [&str; 2] = ["StreamingTV", "StreamingMovies"];

/// Columns that go through the scaler: raw numericals then engineered ones
pub fn scaled_columns() -> Vec<String> {
    NUMERICAL_FIELDS
        .iter()
        .chain(ENGINEERED_COLUMNS.iter())
        .map(|c| c.to_string())
        .collect()
}

/// Model input order used when training a fresh model
pub fn default_feature_order() -> Vec<String> {
    RAW_COLUMNS
        .iter()
        .chain(ENGINEERED_COLUMNS.iter())
        .map(|c| c.to_string())
        .collect()
}

/// Valid values for each categorical field, for client-side form construction
pub fn categorical_options() -> Vec<(&'static str, Vec<&'static str>)> {
    const YES_NO: [&str; 2] = ["Yes", "No"];
    const INTERNET_ADDON: [&str; 3] = ["Yes", "No", "No internet service"];

    vec![
        ("gender", vec!["Male", "Female"]),
        ("Partner", YES_NO.to_vec()),
        ("Dependents", YES_NO.to_vec()),
        ("PhoneService", YES_NO.to_vec()),
        ("MultipleLines", vec!["Yes", "No", "No phone service"]),
        ("InternetService", vec!["DSL", "Fiber optic", "No"]),
        ("OnlineSecurity", INTERNET_ADDON.to_vec()),
        ("OnlineBackup", INTERNET_ADDON.to_vec()),
        ("DeviceProtection", INTERNET_ADDON.to_vec()),
        ("TechSupport", INTERNET_ADDON.to_vec()),
        ("StreamingTV", INTERNET_ADDON.to_vec()),
        ("StreamingMovies", INTERNET_ADDON.to_vec()),
        ("Contract", vec!["Month-to-month", "One year", "Two year"]),
        ("PaperlessBilling", YES_NO.to_vec()),
        (
            "PaymentMethod",
            vec![
                "Electronic check",
                "Mailed check",
                "Bank transfer (automatic)",
                "Credit card (automatic)",
            ],
        ),
    ]
}

/// Valid values for the senior citizen flag
pub const SENIOR_CITIZEN_OPTIONS: [u8; 2] = [0, 1];
