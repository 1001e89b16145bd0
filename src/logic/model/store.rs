//! Durable model artifact (JSON)
//!
//! One file per trained model: `{vocab, idf, weights, bias, threshold}`.
//! The `idf` and `weights` maps are keyed by stringified index and carry
//! only nonzero weight entries. Load(save(m)) must reproduce identical
//! predictions for any input.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Model;
use crate::error::{EngineError, EngineResult};
use crate::logic::vocab::Vocabulary;

#[derive(Serialize, Deserialize)]
struct ModelArtifact {
    vocab: HashMap<String, usize>,
    idf: HashMap<String, f64>,
    weights: HashMap<String, f64>,
    bias: f64,
    threshold: f64,
}

/// Serialize the model to its JSON artifact, creating parent directories.
pub fn save(model: &Model, path: &Path) -> EngineResult<()> {
    let artifact = ModelArtifact {
        vocab: model.vocab.index.clone(),
        idf: model
            .vocab
            .idf
            .iter()
            .enumerate()
            .map(|(i, &v)| (i.to_string(), v))
            .collect(),
        weights: model
            .weights
            .iter()
            .filter(|(_, &w)| w != 0.0)
            .map(|(&i, &w)| (i.to_string(), w))
            .collect(),
        bias: model.bias,
        threshold: model.threshold,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(&artifact)
        .map_err(|e| EngineError::Artifact(format!("serialize failed: {}", e)))?;
    fs::write(path, json)?;
    log::info!("Model saved to {}", path.display());
    Ok(())
}

/// Load a model from its JSON artifact.
pub fn load(path: &Path) -> EngineResult<Model> {
    let content = fs::read_to_string(path)?;
    let artifact: ModelArtifact = serde_json::from_str(&content)
        .map_err(|e| EngineError::Artifact(format!("parse failed: {}", e)))?;

    let vocab_size = artifact.vocab.len();

    // Vocab indices must be unique and in range; with exactly vocab_size
    // entries that also makes them contiguous over [0, vocab_size).
    let mut seen = vec![false; vocab_size];
    for (feature, &idx) in &artifact.vocab {
        if idx >= vocab_size {
            return Err(EngineError::Artifact(format!(
                "vocab index {} out of range for feature {:?}",
                idx, feature
            )));
        }
        if seen[idx] {
            return Err(EngineError::Artifact(format!("duplicate vocab index {}", idx)));
        }
        seen[idx] = true;
    }

    let mut idf = vec![0.0f64; vocab_size];
    let mut covered = vec![false; vocab_size];
    for (key, value) in &artifact.idf {
        let idx: usize = key
            .parse()
            .map_err(|_| EngineError::Artifact(format!("bad idf index {:?}", key)))?;
        if idx >= vocab_size {
            return Err(EngineError::Artifact(format!("idf index {} out of range", idx)));
        }
        idf[idx] = *value;
        covered[idx] = true;
    }
    if let Some(missing) = covered.iter().position(|&c| !c) {
        return Err(EngineError::Artifact(format!("idf missing index {}", missing)));
    }

    let mut weights = BTreeMap::new();
    for (key, value) in &artifact.weights {
        let idx: usize = key
            .parse()
            .map_err(|_| EngineError::Artifact(format!("bad weight index {:?}", key)))?;
        weights.insert(idx, *value);
    }

    Ok(Model {
        vocab: Vocabulary { index: artifact.vocab, idf },
        weights,
        bias: artifact.bias,
        threshold: artifact.threshold,
    })
}
