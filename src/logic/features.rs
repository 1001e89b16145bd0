//! Feature extraction - word and character n-grams
//!
//! Word unigrams + adjacent bigrams capture vocabulary, while character
//! 3-5 grams slide across the whole normalized text with no word-boundary
//! requirement. The character grams are what catch leetspeak substitution
//! ("verify" -> "ver1fy") and keep the feature space script-agnostic for
//! code-mixed input. Duplicates are preserved; counting happens downstream.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text;

/// Character n-gram window bounds
pub const CHAR_NGRAM_MIN: usize = 3;
pub const CHAR_NGRAM_MAX: usize = 5;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Word unigrams plus adjacent-pair bigrams over Unicode word characters.
pub fn word_ngrams(normalized: &str) -> Vec<String> {
    let tokens: Vec<&str> = WORD_RE.find_iter(normalized).map(|m| m.as_str()).collect();

    let mut grams: Vec<String> = tokens.iter().map(|t| (*t).to_string()).collect();
    for pair in tokens.windows(2) {
        grams.push(format!("{} {}", pair[0], pair[1]));
    }
    grams
}

/// Character n-grams of width `CHAR_NGRAM_MIN..=CHAR_NGRAM_MAX`, measured in
/// chars rather than bytes so multi-byte scripts window correctly.
pub fn char_ngrams(normalized: &str) -> Vec<String> {
    let chars: Vec<char> = normalized.chars().collect();
    let mut grams = Vec::new();
    for n in CHAR_NGRAM_MIN..=CHAR_NGRAM_MAX {
        for window in chars.windows(n) {
            grams.push(window.iter().collect());
        }
    }
    grams
}

/// The full feature set of a document: word n-grams then character n-grams,
/// over the normalized form of the text.
pub fn extract(text: &str) -> Vec<String> {
    let normalized = text::normalize(text);
    let mut feats = word_ngrams(&normalized);
    feats.extend(char_ngrams(&normalized));
    feats
}
