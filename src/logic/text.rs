//! Text normalization, fingerprinting, and script detection
//!
//! Everything here operates on raw code-mixed input before any scoring.
//! Normalization is the contract for cache keys: two messages that differ
//! only by case or whitespace must produce the same fingerprint.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

use crate::constants::MAX_TEXT_LENGTH;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Script ranges for best-effort language detection
static LATIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]").unwrap());
static DEVANAGARI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0900}-\u{097F}]").unwrap());
static BENGALI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0980}-\u{09FF}]").unwrap());
static GURMUKHI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0A00}-\u{0A7F}]").unwrap());
static GUJARATI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0A80}-\u{0AFF}]").unwrap());
static TAMIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0B80}-\u{0BFF}]").unwrap());
static TELUGU_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0C00}-\u{0C7F}]").unwrap());
static KANNADA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0C80}-\u{0CFF}]").unwrap());
static MALAYALAM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0D00}-\u{0D7F}]").unwrap());
static ARABIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0600}-\u{06FF}]").unwrap());

/// Lowercase, trim, collapse whitespace, and NFC-normalize Unicode.
pub fn normalize(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    let lowered = nfc.trim().to_lowercase();
    WHITESPACE_RE.replace_all(&lowered, " ").into_owned()
}

/// Remove control characters but keep newlines and tabs.
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|&ch| !ch.is_control() || ch == '\n' || ch == '\t')
        .collect()
}

/// Full preprocessing pipeline: clean then normalize.
pub fn preprocess(text: &str) -> String {
    normalize(&clean(text))
}

/// SHA-256 hex digest of the normalized text. Used as the cache key so
/// trivially-reformatted duplicates collide.
pub fn fingerprint(text: &str) -> String {
    let normalized = normalize(text);
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

/// Check that text is non-empty and within the maximum length.
pub fn validate_length(text: &str) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("Text is empty");
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err("Text exceeds maximum length");
    }
    Ok(())
}

/// Best-effort list of languages/scripts detected in text, in order of
/// first detection. Falls back to `["Unknown"]`.
pub fn detect_languages(text: &str) -> Vec<&'static str> {
    let checks: [(&Lazy<Regex>, &'static str); 10] = [
        (&LATIN_RE, "English"),
        (&DEVANAGARI_RE, "Hindi"),
        (&BENGALI_RE, "Bengali"),
        (&GURMUKHI_RE, "Punjabi"),
        (&GUJARATI_RE, "Gujarati"),
        (&TAMIL_RE, "Tamil"),
        (&TELUGU_RE, "Telugu"),
        (&KANNADA_RE, "Kannada"),
        (&MALAYALAM_RE, "Malayalam"),
        (&ARABIC_RE, "Urdu"),
    ];

    let langs: Vec<&'static str> = checks
        .iter()
        .filter(|(re, _)| re.is_match(text))
        .map(|(_, lang)| *lang)
        .collect();

    if langs.is_empty() {
        vec!["Unknown"]
    } else {
        langs
    }
}
