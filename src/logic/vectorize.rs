//! Sparse TF-IDF vectorization
//!
//! `SparseVector` is the single sparse-array abstraction shared by vectors
//! and model weights: an index -> weight map where absent indices read as
//! zero. Backed by a BTreeMap so accumulation order (and therefore every
//! floating-point sum) is deterministic; predictions must be bit-identical
//! across runs and across a save/load round-trip.

use std::collections::BTreeMap;

use super::vocab::Vocabulary;

/// Sparse index -> weight map with a defined zero default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector(pub BTreeMap<usize, f64>);

impl SparseVector {
    pub fn new() -> Self {
        SparseVector(BTreeMap::new())
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.0.get(&idx).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&usize, &f64)> {
        self.0.iter()
    }

    /// Dot product against a sparse weight map (absent weights are zero).
    pub fn dot(&self, weights: &BTreeMap<usize, f64>) -> f64 {
        self.0
            .iter()
            .map(|(idx, v)| weights.get(idx).copied().unwrap_or(0.0) * v)
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.0.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit L2 norm. Empty and zero vectors are left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in self.0.values_mut() {
                *v /= norm;
            }
        }
    }
}

/// Map a document's features onto the frozen vocabulary as an L2-normalized
/// TF-IDF vector. Features outside the vocabulary are dropped silently;
/// a document with no retained features yields the empty (zero) vector.
pub fn vectorize(features: &[String], vocab: &Vocabulary) -> SparseVector {
    let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
    let mut total = 0u32;

    for feat in features {
        if let Some(&idx) = vocab.index.get(feat.as_str()) {
            *counts.entry(idx).or_insert(0) += 1;
            total += 1;
        }
    }

    if total == 0 {
        return SparseVector::new();
    }

    let mut vec = SparseVector::new();
    for (idx, count) in counts {
        let tf = count as f64 / total as f64;
        vec.0.insert(idx, tf * vocab.idf[idx]);
    }
    vec.l2_normalize();
    vec
}
