//! Risk tiering of churn probabilities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk bucket derived from churn probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const MEDIUM_THRESHOLD: f64 = 0.3;
    pub const HIGH_THRESHOLD: f64 = 0.6;
    pub const CRITICAL_THRESHOLD: f64 = 0.8;

    /// Step function over probability; a boundary value belongs to the higher tier
    pub fn from_probability(probability: f64) -> Self {
        if probability < Self::MEDIUM_THRESHOLD {
            RiskLevel::Low
        } else if probability < Self::HIGH_THRESHOLD {
            RiskLevel::Medium
        } else if probability < Self::CRITICAL_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.79), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.8), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::Critical);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = RiskLevel::Low;
        for i in 0..=100 {
            let tier = RiskLevel::from_probability(i as f64 / 100.0);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_value(RiskLevel::Critical).unwrap(), "Critical");
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }
}
