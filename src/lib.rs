//! SurakshaAI Core - Multilingual Phishing Risk Scoring
//!
//! Scores short, code-mixed messages (English + Indic scripts + Romanized
//! transliteration) for phishing risk. Combines a from-scratch TF-IDF +
//! logistic-regression classifier with a deterministic context-risk engine
//! and an optional GenAI semantic validator.
//!
//! ## Architecture
//! - `logic/text` - normalization, fingerprinting, script detection
//! - `logic/features` - word + character n-gram extraction
//! - `logic/vocab` / `logic/vectorize` - vocabulary, IDF, sparse TF-IDF
//! - `logic/model` - SGD training, threshold tuning, artifact store
//! - `logic/context` - rule-based context risk engine
//! - `logic/genai` - external semantic validator client
//! - `logic/classifier` - hybrid fusion + result cache

pub mod constants;
pub mod error;
pub mod logic;

pub use error::EngineError;
pub use logic::classifier::{HybridClassifier, MlPrediction, RiskAssessment, Severity, ThreatDetail};
pub use logic::context::{calculate_contextual_risk, extract_links, ContextResult, RiskLevel};
pub use logic::genai::{GenAiAnalyzer, GenAiVerdict, ValidatorOutcome};
pub use logic::model::Model;
