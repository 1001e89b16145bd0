//! Decision-threshold tuning and evaluation
//!
//! Sweeps a discretized threshold range on held-out probabilities and keeps
//! the F1-maximizing cut. Ties go to the first (lowest) threshold so the
//! result is deterministic. The confusion matrix at the winning threshold is
//! reported for audit and regression tracking.

use serde::{Deserialize, Serialize};

/// Sweep bounds, in hundredths: 0.20 to 0.90 inclusive
const SWEEP_MIN: u32 = 20;
const SWEEP_MAX: u32 = 90;

/// Confusion matrix at a fixed threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    #[serde(rename = "tn")]
    pub true_negative: u64,
    #[serde(rename = "fp")]
    pub false_positive: u64,
    #[serde(rename = "fn")]
    pub false_negative: u64,
    #[serde(rename = "tp")]
    pub true_positive: u64,
}

/// Winning threshold and its held-out metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdReport {
    pub threshold: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Default for ThresholdReport {
    fn default() -> Self {
        Self { threshold: 0.5, precision: 0.0, recall: 0.0, f1: 0.0 }
    }
}

/// Find the F1-maximizing decision threshold over held-out probabilities.
pub fn tune_threshold(labels: &[u8], probs: &[f64]) -> ThresholdReport {
    debug_assert_eq!(labels.len(), probs.len());
    let mut best = ThresholdReport::default();

    for i in SWEEP_MIN..=SWEEP_MAX {
        let t = i as f64 / 100.0;
        let (mut tp, mut fp, mut fn_) = (0u64, 0u64, 0u64);
        for (&y, &p) in labels.iter().zip(probs) {
            let pred = p >= t;
            match (y == 1, pred) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }
        let precision = if tp + fp > 0 { tp as f64 / (tp + fp) as f64 } else { 0.0 };
        let recall = if tp + fn_ > 0 { tp as f64 / (tp + fn_) as f64 } else { 0.0 };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        // Strict comparison keeps the lowest threshold on ties.
        if f1 > best.f1 {
            best = ThresholdReport { threshold: t, precision, recall, f1 };
        }
    }
    best
}

/// Confusion matrix of binary predictions against labels.
pub fn confusion_matrix(labels: &[u8], preds: &[bool]) -> ConfusionMatrix {
    debug_assert_eq!(labels.len(), preds.len());
    let mut cm = ConfusionMatrix {
        true_negative: 0,
        false_positive: 0,
        false_negative: 0,
        true_positive: 0,
    };
    for (&y, &p) in labels.iter().zip(preds) {
        match (y == 1, p) {
            (false, false) => cm.true_negative += 1,
            (false, true) => cm.false_positive += 1,
            (true, false) => cm.false_negative += 1,
            (true, true) => cm.true_positive += 1,
        }
    }
    cm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfectly_separable_picks_lowest_tied_threshold() {
        // Positives at 0.9, negatives at 0.1: every threshold in the sweep
        // yields F1=1.0, so the first (0.20) must win.
        let labels = vec![1, 1, 0, 0];
        let probs = vec![0.9, 0.9, 0.1, 0.1];
        let report = tune_threshold(&labels, &probs);
        assert!((report.threshold - 0.20).abs() < 1e-12);
        assert!((report.f1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_separates_overlapping_scores() {
        // One positive at 0.45: thresholds above 0.45 lose recall.
        let labels = vec![1, 1, 1, 0, 0, 0];
        let probs = vec![0.9, 0.8, 0.45, 0.4, 0.3, 0.2];
        let report = tune_threshold(&labels, &probs);
        assert!(report.threshold <= 0.45);
        assert!((report.recall - 1.0).abs() < 1e-12);
        assert!((report.f1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_confusion_matrix_counts() {
        let labels = vec![1, 1, 0, 0, 1, 0];
        let preds = vec![true, false, true, false, true, false];
        let cm = confusion_matrix(&labels, &preds);
        assert_eq!(cm.true_positive, 2);
        assert_eq!(cm.false_negative, 1);
        assert_eq!(cm.false_positive, 1);
        assert_eq!(cm.true_negative, 2);
    }

    #[test]
    fn test_all_negative_labels_yield_zero_f1() {
        let labels = vec![0, 0, 0];
        let probs = vec![0.1, 0.2, 0.3];
        let report = tune_threshold(&labels, &probs);
        assert_eq!(report.f1, 0.0);
        assert!((report.threshold - 0.5).abs() < 1e-12); // default retained
    }

    #[test]
    fn test_confusion_matrix_serde_keys() {
        let cm = confusion_matrix(&[1, 0], &[true, false]);
        let json = serde_json::to_value(&cm).unwrap();
        assert_eq!(json["tp"], 1);
        assert_eq!(json["tn"], 1);
        assert_eq!(json["fp"], 0);
        assert_eq!(json["fn"], 0);
    }
}
