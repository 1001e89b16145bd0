//! Vocabulary & IDF construction
//!
//! Consumes the feature sets of a whole training corpus once, selects a
//! bounded vocabulary, and computes inverse-document-frequency weights.
//! The output is frozen for the lifetime of the model.

use std::collections::{HashMap, HashSet};

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 120_000;

/// Default minimum document frequency
pub const DEFAULT_MIN_DF: u64 = 1;

/// Feature-token -> dense index map plus the IDF table aligned to it.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub index: HashMap<String, usize>,
    /// IDF per dense index; `idf.len() == index.len()`
    pub idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Build a vocabulary from per-document feature sets.
///
/// Features with `df < min_df` are discarded; survivors are ranked by
/// corpus-wide term frequency descending, ties broken by first-seen order
/// (stable sort) so repeated training runs assign identical indices.
/// IDF is `ln((1+N)/(1+df)) + 1`.
pub fn build(docs_features: &[Vec<String>], max_features: usize, min_df: u64) -> Vocabulary {
    struct FeatureStats {
        tf: u64,
        df: u64,
        first_seen: usize,
    }

    let mut stats: HashMap<&str, FeatureStats> = HashMap::new();
    let mut order = 0usize;

    for feats in docs_features {
        let mut seen_in_doc: HashSet<&str> = HashSet::new();
        for feat in feats {
            match stats.get_mut(feat.as_str()) {
                Some(s) => s.tf += 1,
                None => {
                    stats.insert(
                        feat.as_str(),
                        FeatureStats { tf: 1, df: 0, first_seen: order },
                    );
                    order += 1;
                }
            }
            seen_in_doc.insert(feat.as_str());
        }
        for feat in seen_in_doc {
            if let Some(s) = stats.get_mut(feat) {
                s.df += 1;
            }
        }
    }

    let mut ranked: Vec<(&str, FeatureStats)> = stats
        .into_iter()
        .filter(|(_, s)| s.df >= min_df)
        .collect();
    ranked.sort_by_key(|(_, s)| s.first_seen);
    ranked.sort_by(|a, b| b.1.tf.cmp(&a.1.tf));
    ranked.truncate(max_features);

    let n_docs = docs_features.len() as f64;
    let mut index = HashMap::with_capacity(ranked.len());
    let mut idf = Vec::with_capacity(ranked.len());

    for (i, (feat, s)) in ranked.into_iter().enumerate() {
        index.insert(feat.to_string(), i);
        idf.push(((1.0 + n_docs) / (1.0 + s.df as f64)).ln() + 1.0);
    }

    Vocabulary { index, idf }
}
