//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Runtime overrides come from environment variables via the `get_*` helpers.

use std::time::Duration;

/// Maximum accepted message length (characters)
pub const MAX_TEXT_LENGTH: usize = 5000;

/// Result cache capacity (entries)
pub const CACHE_MAX_ENTRIES: usize = 1000;

/// Result cache TTL (seconds)
pub const CACHE_TTL_SECS: u64 = 60;

// ============================================================================
// FUSION POLICY
// ============================================================================

/// Weight of the learned (ML + context) score in fusion
pub const FUSION_ML_WEIGHT: f64 = 0.6;

/// Weight of the GenAI validator score in fusion
pub const FUSION_GENAI_WEIGHT: f64 = 0.4;

/// Validator is consulted when the learned score (0-100) is at or above this
pub const GENAI_HIGH_BAND: u8 = 35;

/// ... or at or below this. The broad middle is skipped.
pub const GENAI_LOW_BAND: u8 = 20;

/// Fused score (0-100) at which a generic threat detail is synthesized
/// when no explicit evidence exists
pub const SYNTH_THREAT_CUTOFF: u8 = 55;

/// Excerpt length for synthesized threat details
pub const EXCERPT_CHARS: usize = 220;

// ============================================================================
// SEVERITY TIERS (0-100 scale)
// ============================================================================

/// Scores below this are `low`
pub const SEVERITY_MEDIUM_MIN: u8 = 25;

/// Scores at or above `SEVERITY_MEDIUM_MIN` and below this are `medium`
pub const SEVERITY_HIGH_MIN: u8 = 55;

/// Scores at or above `SEVERITY_HIGH_MIN` and below this are `high`;
/// at or above, `critical`
pub const SEVERITY_CRITICAL_MIN: u8 = 85;

// ============================================================================
// PATHS
// ============================================================================

/// Default trained model artifact
pub const DEFAULT_MODEL_PATH: &str = "models/phishing_model.json";

/// Default canonical training dataset (CSV: text,label)
pub const DEFAULT_DATASET_PATH: &str = "data/phishing_multilingual.csv";

// ============================================================================
// GENAI VALIDATOR
// ============================================================================

/// Claude model used for semantic validation
pub const DEFAULT_GENAI_MODEL: &str = "claude-sonnet-4-20250514";

/// Validator request timeout (seconds)
pub const DEFAULT_GENAI_TIMEOUT_SECS: u64 = 5;

/// Anthropic messages endpoint
pub const GENAI_API_URL: &str = "https://api.anthropic.com/v1/messages";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("SURAKSHA_MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get training dataset path from environment or use default
pub fn get_dataset_path() -> String {
    std::env::var("SURAKSHA_DATASET_PATH").unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string())
}

/// Get the Anthropic API key, if configured
pub fn get_genai_api_key() -> Option<String> {
    std::env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty())
}

/// Check if the GenAI validator is enabled
pub fn is_genai_enabled() -> bool {
    std::env::var("ENABLE_GENAI")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}

/// Get validator timeout from environment or use default
pub fn get_genai_timeout() -> Duration {
    let secs = std::env::var("GENAI_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_GENAI_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
