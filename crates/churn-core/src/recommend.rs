//! Retention recommendations
//!
//! A fixed, ordered rule table evaluated against the raw record and the
//! predicted churn probability. Every rule is independent and emits at most
//! one recommendation. The result is stably sorted by priority, so rules of
//! equal priority keep their table order.

use crate::record::CustomerRecord;
use serde::{Deserialize, Serialize};

/// Recommendation priority; declaration order is sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Expected retention impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// A human-readable retention action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub message: String,
    pub impact: Impact,
}

/// One row of the rule table
pub struct RetentionRule {
    pub id: &'static str,
    pub category: &'static str,
    pub priority: Priority,
    pub impact: Impact,
    pub message: &'static str,
    pub applies: fn(&CustomerRecord, f64) -> bool,
}

impl RetentionRule {
    fn evaluate(&self, record: &CustomerRecord, probability: f64) -> Option<Recommendation> {
        (self.applies)(record, probability).then(|| Recommendation {
            category: self.category.to_string(),
            priority: self.priority,
            message: self.message.to_string(),
            impact: self.impact,
        })
    }
}

/// Average monthly charge above which pricing is flagged
pub const HIGH_CHARGE_THRESHOLD: f64 = 70.0;

/// Tenure (months) below which a customer counts as new
pub const NEW_CUSTOMER_TENURE: f64 = 12.0;

/// Probability above which fiber customers get a service-quality check
pub const FIBER_PROBABILITY_THRESHOLD: f64 = 0.5;

fn has_internet(record: &CustomerRecord) -> bool {
    record.internet_service != "No"
}

/// The rule table, in evaluation order
pub static RULES: &[RetentionRule] = &[
    RetentionRule {
        id: "long_term_contract",
        category: "Contract",
        priority: Priority::High,
        impact: Impact::High,
        message: "Upgrade to a long-term contract (1 or 2 years) with a discount to improve retention",
        applies: |r, _| r.contract == "Month-to-month",
    },
    RetentionRule {
        id: "new_customer_onboarding",
        category: "Engagement",
        priority: Priority::High,
        impact: Impact::High,
        message: "Customer is in the critical first year. Implement welcome program and regular check-ins",
        applies: |r, _| r.tenure < NEW_CUSTOMER_TENURE,
    },
    RetentionRule {
        id: "online_security",
        category: "Services",
        priority: Priority::Medium,
        impact: Impact::Medium,
        message: "Offer online security service with promotional pricing",
        applies: |r, _| r.online_security != "Yes" && has_internet(r),
    },
    RetentionRule {
        id: "tech_support",
        category: "Services",
        priority: Priority::Medium,
        impact: Impact::Medium,
        message: "Provide tech support service to enhance customer satisfaction",
        applies: |r, _| r.tech_support != "Yes" && has_internet(r),
    },
    RetentionRule {
        id: "automatic_payment",
        category: "Payment",
        priority: Priority::Medium,
        impact: Impact::Medium,
        message: "Encourage automatic payment methods with incentives to reduce friction",
        applies: |r, _| r.payment_method == "Electronic check",
    },
    RetentionRule {
        id: "paperless_billing",
        category: "Engagement",
        priority: Priority::Low,
        impact: Impact::Low,
        message: "Promote paperless billing with incentives for environmental and convenience benefits",
        applies: |r, _| r.paperless_billing == "No",
    },
    RetentionRule {
        id: "high_charges",
        category: "Pricing",
        priority: Priority::High,
        impact: Impact::High,
        message: "Customer has high charges. Consider loyalty discount or bundled service offers",
        applies: |r, _| r.avg_monthly_charges() > HIGH_CHARGE_THRESHOLD,
    },
    RetentionRule {
        id: "fiber_service_quality",
        category: "Service Quality",
        priority: Priority::High,
        impact: Impact::High,
        message: "Fiber optic customers show higher churn. Check service quality and consider retention offers",
        applies: |r, p| r.internet_service == "Fiber optic" && p > FIBER_PROBABILITY_THRESHOLD,
    },
];

/// Evaluate every rule and return the emitted recommendations, High first
pub fn generate_recommendations(record: &CustomerRecord, probability: f64) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter_map(|rule| rule.evaluate(record, probability))
        .collect();
    recommendations.sort_by_key(|r| r.priority);
    recommendations
}
