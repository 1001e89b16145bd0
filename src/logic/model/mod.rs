//! Learned classifier - model value, inference, and bootstrap
//!
//! A `Model` is an immutable bundle of {vocabulary, IDF, sparse weights,
//! bias, decision threshold}. Training produces a new value; nothing is
//! ever mutated in place after load. Reload means constructing a fresh
//! `Model` and swapping the reference at composition time.
//!
//! ## Structure
//! - `train` - class-balanced SGD fitting
//! - `threshold` - F1 sweep + confusion matrix
//! - `store` - durable JSON artifact

pub mod store;
pub mod threshold;
pub mod train;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::logic::vocab::Vocabulary;
use crate::logic::{dataset, features, vectorize};

pub use threshold::{ConfusionMatrix, ThresholdReport};
pub use train::TrainConfig;

/// Model identity string reported in predictions and stats
pub const MODEL_NAME: &str = "tfidf-logreg-multilingual";

/// Trained classifier artifact. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Model {
    pub vocab: Vocabulary,
    /// Sparse weight vector; only indices touched during training appear.
    /// Ordered map keeps score accumulation deterministic.
    pub weights: BTreeMap<usize, f64>,
    pub bias: f64,
    /// Decision threshold in [0, 1]
    pub threshold: f64,
}

impl Model {
    /// Raw phishing probability for a text.
    pub fn predict_proba(&self, text: &str) -> f64 {
        let feats = features::extract(text);
        let x = vectorize::vectorize(&feats, &self.vocab);
        let z = self.bias + x.dot(&self.weights);
        sigmoid(z)
    }

    /// Binary decision at the tuned threshold.
    pub fn predict(&self, text: &str) -> bool {
        self.predict_proba(text) >= self.threshold
    }
}

/// Logistic sigmoid with the linear score clamped to avoid overflow.
pub fn sigmoid(z: f64) -> f64 {
    let z = z.clamp(-30.0, 30.0);
    1.0 / (1.0 + (-z).exp())
}

/// Bootstrap a model: load the artifact if present, otherwise train
/// synchronously from the canonical dataset. Fails only when neither exists.
pub fn load_or_train(model_path: &Path, dataset_path: &Path) -> EngineResult<Model> {
    if model_path.exists() {
        let model = store::load(model_path)?;
        log::info!(
            "Loaded model from {} ({} features)",
            model_path.display(),
            model.vocab.len()
        );
        return Ok(model);
    }

    if !dataset_path.exists() {
        return Err(EngineError::ModelUnavailable(format!(
            "no artifact at {} and no dataset at {}",
            model_path.display(),
            dataset_path.display()
        )));
    }

    log::warn!("Model artifact missing, training from {}", dataset_path.display());
    let rows = dataset::read_labeled(dataset_path)?;
    let texts: Vec<String> = rows.iter().map(|r| r.text.clone()).collect();
    let labels: Vec<u8> = rows.iter().map(|r| r.label).collect();

    let model = train::fit(&texts, &labels, &TrainConfig::default());

    // Best effort persist so the next startup is cheap.
    if let Err(e) = store::save(&model, model_path) {
        log::warn!("Could not persist trained model: {}", e);
    }
    Ok(model)
}
