//! Logistic regression training via SGD
//!
//! Per-example gradient steps over sparse TF-IDF vectors, class-balanced so
//! the minority class is not swamped by volume, with L2 regularization and
//! multiplicative learning-rate decay per epoch. The shuffle is seeded:
//! identical data + config must reproduce identical weights.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::{sigmoid, Model};
use crate::logic::{features, vectorize, vocab};

/// Training hyperparameters (configurable, defaults match the shipped model)
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    /// Multiplicative learning-rate decay applied after each epoch
    pub lr_decay: f64,
    /// L2 regularization strength
    pub l2: f64,
    pub seed: u64,
    pub max_features: usize,
    pub min_df: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 14,
            learning_rate: 0.3,
            lr_decay: 0.92,
            l2: 1e-5,
            seed: 42,
            max_features: vocab::DEFAULT_MAX_FEATURES,
            min_df: vocab::DEFAULT_MIN_DF,
        }
    }
}

/// Fit a class-balanced logistic-regression model over the corpus.
/// Labels are binary: 1 = phishing, 0 = legitimate.
pub fn fit(texts: &[String], labels: &[u8], cfg: &TrainConfig) -> Model {
    debug_assert_eq!(texts.len(), labels.len());

    let docs_features: Vec<Vec<String>> = texts.iter().map(|t| features::extract(t)).collect();
    let vocabulary = vocab::build(&docs_features, cfg.max_features, cfg.min_df);
    let vectors: Vec<vectorize::SparseVector> = docs_features
        .iter()
        .map(|f| vectorize::vectorize(f, &vocabulary))
        .collect();

    let n = labels.len() as f64;
    let n_pos = labels.iter().filter(|&&y| y == 1).count() as f64;
    let n_neg = n - n_pos;
    let w_pos = if n_pos > 0.0 { n / (2.0 * n_pos) } else { 1.0 };
    let w_neg = if n_neg > 0.0 { n / (2.0 * n_neg) } else { 1.0 };

    let mut model = Model {
        vocab: vocabulary,
        weights: std::collections::BTreeMap::new(),
        bias: 0.0,
        threshold: 0.5,
    };

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut lr = cfg.learning_rate;
    let mut order: Vec<usize> = (0..labels.len()).collect();

    for _ in 0..cfg.epochs {
        order.shuffle(&mut rng);
        for &i in &order {
            let x = &vectors[i];
            let y = labels[i] as f64;

            let z = model.bias + x.dot(&model.weights);
            let p = sigmoid(z);
            let class_weight = if labels[i] == 1 { w_pos } else { w_neg };
            let err = (p - y) * class_weight;

            for (&j, &v) in x.iter() {
                let w = model.weights.entry(j).or_insert(0.0);
                *w -= lr * (err * v + cfg.l2 * *w);
            }
            model.bias -= lr * err;
        }
        lr *= cfg.lr_decay;
    }

    log::info!(
        "Trained model: {} docs, {} features, {} nonzero weights",
        labels.len(),
        model.vocab.len(),
        model.weights.len()
    );
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> (Vec<String>, Vec<u8>) {
        let phishing = [
            "urgent share your otp now account blocked",
            "verify account password turant kyc expire",
            "otp password share karo bank alert",
            "click link verify otp urgent bank",
        ];
        let legit = [
            "kal meeting hai 3 baje office",
            "movie dekhne chalte hain weekend",
            "lunch at noon with the team",
            "project update shared in the doc",
        ];
        let mut texts = Vec::new();
        let mut labels = Vec::new();
        for t in phishing {
            texts.push(t.to_string());
            labels.push(1);
        }
        for t in legit {
            texts.push(t.to_string());
            labels.push(0);
        }
        (texts, labels)
    }

    #[test]
    fn test_fit_separates_classes() {
        let (texts, labels) = corpus();
        let model = fit(&texts, &labels, &TrainConfig::default());

        let phish_p = model.predict_proba("share otp urgent bank verify");
        let legit_p = model.predict_proba("meeting at the office kal");
        assert!(phish_p > legit_p);
        assert!(phish_p > 0.5);
        assert!(legit_p < 0.5);
    }

    #[test]
    fn test_fit_is_deterministic_with_seed() {
        let (texts, labels) = corpus();
        let a = fit(&texts, &labels, &TrainConfig::default());
        let b = fit(&texts, &labels, &TrainConfig::default());

        assert_eq!(a.bias.to_bits(), b.bias.to_bits());
        assert_eq!(a.weights.len(), b.weights.len());
        for (idx, w) in &a.weights {
            assert_eq!(w.to_bits(), b.weights[idx].to_bits());
        }
    }

    #[test]
    fn test_probabilities_in_range() {
        let (texts, labels) = corpus();
        let model = fit(&texts, &labels, &TrainConfig::default());
        for text in &texts {
            let p = model.predict_proba(text);
            assert!(p.is_finite());
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_untouched_indices_stay_absent() {
        let (texts, labels) = corpus();
        let model = fit(&texts, &labels, &TrainConfig::default());
        // Sparse contract: weight map only holds indices seen in training.
        assert!(model.weights.len() <= model.vocab.len());
    }
}
