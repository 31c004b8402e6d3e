//! Risk tiering and retention recommendation behaviour

mod common;

use churn_core::{generate_recommendations, Priority, RiskLevel};
use common::record_with;
use serde_json::json;

fn assert_sorted(recs: &[churn_core::Recommendation]) {
    for pair in recs.windows(2) {
        assert!(pair[0].priority <= pair[1].priority, "not sorted: {:?}", recs);
    }
}

#[test]
fn test_new_month_to_month_customer() {
    let record = record_with(json!({
        "Contract": "Month-to-month",
        "tenure": 2,
        "OnlineSecurity": "No",
        "InternetService": "DSL",
        "TotalCharges": 60.0
    }));
    let recs = generate_recommendations(&record, 0.2);
    assert_sorted(&recs);

    let first_medium = recs
        .iter()
        .position(|r| r.priority != Priority::High)
        .unwrap_or(recs.len());
    let contract = recs.iter().position(|r| r.category == "Contract").unwrap();
    let onboarding = recs
        .iter()
        .position(|r| r.category == "Engagement" && r.priority == Priority::High)
        .unwrap();
    assert!(contract < first_medium);
    assert!(onboarding < first_medium);
    assert!(recs.iter().any(|r| r.message.contains("online security")));
}

#[test]
fn test_fiber_customer_at_high_risk() {
    // Contract M2M, tenure 2, fiber, 95/month, 190 total, e-check, paperless
    let record = record_with(json!({}));
    let probability = 0.75;
    assert_eq!(RiskLevel::from_probability(probability), RiskLevel::High);

    let recs = generate_recommendations(&record, probability);
    assert_sorted(&recs);

    let fiber = recs
        .iter()
        .find(|r| r.category == "Service Quality")
        .expect("fiber rule should fire");
    assert_eq!(fiber.priority, Priority::High);

    let payment = recs
        .iter()
        .find(|r| r.category == "Payment")
        .expect("electronic check rule should fire");
    assert_eq!(payment.priority, Priority::Medium);

    // 190 / 3 is below the pricing threshold and billing is paperless
    assert!(!recs.iter().any(|r| r.category == "Pricing"));
    assert!(!recs.iter().any(|r| r.priority == Priority::Low));
    assert_eq!(recs.len(), 6);
}

#[test]
fn test_recommendations_always_sorted() {
    for tenure in [0, 6, 24] {
        for contract in ["Month-to-month", "One year"] {
            for billing in ["Yes", "No"] {
                let record = record_with(json!({
                    "tenure": tenure,
                    "Contract": contract,
                    "PaperlessBilling": billing,
                    "TotalCharges": 900.0
                }));
                assert_sorted(&generate_recommendations(&record, 0.9));
            }
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let record = record_with(json!({"PaperlessBilling": "No"}));
    assert_eq!(
        generate_recommendations(&record, 0.6),
        generate_recommendations(&record, 0.6)
    );
}
