//! Held-out evaluation metrics

use super::Classifier;
use crate::error::{Result, RuntimeError};
use crate::transform::Matrix;
use serde::{Deserialize, Serialize};

/// Probability at or above which a row is predicted as recovered
pub const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    /// Undefined when the evaluation labels contain one class only
    pub roc_auc: Option<f64>,
    pub f1_score: f64,
}

/// Score a fitted classifier on a labelled matrix
pub fn evaluate(classifier: &dyn Classifier, x: &Matrix, y: &[u8]) -> Result<EvaluationMetrics> {
    if x.n_rows() != y.len() {
        return Err(RuntimeError::DimensionMismatch {
            expected: x.n_rows(),
            actual: y.len(),
        });
    }

    let scores: Vec<f64> = classifier
        .predict_proba(x)?
        .iter()
        .map(|p| p.recovered)
        .collect();
    let predicted: Vec<u8> = scores
        .iter()
        .map(|s| u8::from(*s >= DECISION_THRESHOLD))
        .collect();

    Ok(EvaluationMetrics {
        accuracy: accuracy(y, &predicted),
        roc_auc: roc_auc(y, &scores),
        f1_score: f1_score(y, &predicted),
    })
}

pub fn accuracy(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let correct = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();
    correct as f64 / actual.len() as f64
}

/// F1 of the recovered class; 0 when there are no true positives
pub fn f1_score(actual: &[u8], predicted: &[u8]) -> f64 {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    for (a, p) in actual.iter().zip(predicted) {
        match (*a, *p) {
            (1, 1) => tp += 1,
            (0, 1) => fp += 1,
            (1, 0) => fn_ += 1,
            _ => {}
        }
    }
    if tp == 0 {
        return 0.0;
    }
    let precision = tp as f64 / (tp + fp) as f64;
    let recall = tp as f64 / (tp + fn_) as f64;
    2.0 * precision * recall / (precision + recall)
}

/// Area under the ROC curve via the rank-sum statistic; ties share ranks
pub fn roc_auc(actual: &[u8], scores: &[f64]) -> Option<f64> {
    let positives = actual.iter().filter(|a| **a == 1).count();
    let negatives = actual.len() - positives;
    if positives == 0 || negatives == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|a, b| scores[*a].total_cmp(&scores[*b]));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // 1-based average rank of the tied run
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = rank;
        }
        i = j + 1;
    }

    let positive_rank_sum: f64 = actual
        .iter()
        .zip(&ranks)
        .filter(|(a, _)| **a == 1)
        .map(|(_, r)| r)
        .sum();
    let p = positives as f64;
    Some((positive_rank_sum - p * (p + 1.0) / 2.0) / (p * negatives as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[1, 0, 1, 1], &[1, 0, 0, 1]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_f1() {
        // tp 2, fp 1, fn 1
        let f1 = f1_score(&[1, 1, 1, 0, 0], &[1, 1, 0, 1, 0]);
        assert!((f1 - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(f1_score(&[0, 0], &[0, 0]), 0.0);
    }

    #[test]
    fn test_roc_auc() {
        assert_eq!(roc_auc(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9]), Some(1.0));
        assert_eq!(roc_auc(&[1, 1, 0, 0], &[0.1, 0.2, 0.8, 0.9]), Some(0.0));
        assert_eq!(roc_auc(&[0, 1, 0, 1], &[0.5, 0.5, 0.5, 0.5]), Some(0.5));
        assert_eq!(roc_auc(&[1, 1], &[0.3, 0.4]), None);
    }
}
