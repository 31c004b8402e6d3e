//! Binary classification metrics

use serde::{Deserialize, Serialize};

/// Probability above which a customer is predicted to churn
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Confusion matrix counts for the positive (churn) class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(y_true: &[u8], y_pred: &[u8]) -> Self {
        let mut m = Self::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t, p) {
                (1, 1) => m.true_positive += 1,
                (0, 1) => m.false_positive += 1,
                (1, _) => m.false_negative += 1,
                _ => m.true_negative += 1,
            }
        }
        m
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1_score(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

/// Held-out evaluation summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub roc_auc: f64,
    pub confusion: ConfusionMatrix,
}

impl EvaluationMetrics {
    pub fn evaluate(y_true: &[u8], probabilities: &[f64]) -> Self {
        let y_pred: Vec<u8> = probabilities
            .iter()
            .map(|&p| u8::from(p > DECISION_THRESHOLD))
            .collect();
        let confusion = ConfusionMatrix::from_predictions(y_true, &y_pred);
        Self {
            accuracy: confusion.accuracy(),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1_score: confusion.f1_score(),
            roc_auc: roc_auc(y_true, probabilities),
            confusion,
        }
    }
}

/// Area under the ROC curve via the rank-sum statistic
///
/// Tied scores share their average rank. Returns 0.5 when only one class
/// is present.
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> f64 {
    let n = y_true.len().min(scores.len());
    let positives = y_true[..n].iter().filter(|&&y| y == 1).count();
    let negatives = n - positives;
    if positives == 0 || negatives == 0 {
        return 0.5;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // ranks are 1-based
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = avg;
        }
        i = j + 1;
    }

    let rank_sum: f64 = (0..n).filter(|&k| y_true[k] == 1).map(|k| ranks[k]).sum();
    let p = positives as f64;
    (rank_sum - p * (p + 1.0) / 2.0) / (p * negatives as f64)
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_ranking() {
        let y = [0, 0, 1, 1];
        let s = [0.1, 0.2, 0.8, 0.9];
        assert_eq!(roc_auc(&y, &s), 1.0);
    }

    #[test]
    fn test_inverted_ranking() {
        let y = [1, 1, 0, 0];
        let s = [0.1, 0.2, 0.8, 0.9];
        assert_eq!(roc_auc(&y, &s), 0.0);
    }

    #[test]
    fn test_ties_count_half() {
        let y = [0, 1];
        let s = [0.5, 0.5];
        assert_eq!(roc_auc(&y, &s), 0.5);
    }

    #[test]
    fn test_partial_ranking() {
        // one of four positive/negative pairs is misordered
        let y = [0, 1, 0, 1];
        let s = [0.1, 0.3, 0.4, 0.9];
        assert_eq!(roc_auc(&y, &s), 0.75);
    }

    #[test]
    fn test_single_class_auc() {
        assert_eq!(roc_auc(&[1, 1], &[0.2, 0.9]), 0.5);
    }

    #[test]
    fn test_evaluate_counts() {
        let y = [1, 1, 0, 0, 1];
        let p = [0.9, 0.4, 0.6, 0.1, 0.7];
        let m = EvaluationMetrics::evaluate(&y, &p);
        assert_eq!(m.confusion.true_positive, 2);
        assert_eq!(m.confusion.false_negative, 1);
        assert_eq!(m.confusion.false_positive, 1);
        assert_eq!(m.confusion.true_negative, 1);
        assert!((m.accuracy - 0.6).abs() < 1e-12);
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.f1_score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_strict() {
        let m = EvaluationMetrics::evaluate(&[1], &[0.5]);
        assert_eq!(m.confusion.false_negative, 1);
    }

    #[test]
    fn test_no_positive_predictions() {
        let m = EvaluationMetrics::evaluate(&[1, 0], &[0.1, 0.2]);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.f1_score, 0.0);
    }
}
