//! Logic Module - Scoring Engines
//!
//! ## Pipeline
//! - `text` - normalization, fingerprinting, script detection
//! - `features` -> `vocab` -> `vectorize` - TF-IDF feature space
//! - `model` - training, threshold tuning, persistence, inference
//! - `context` - rule-based context risk engine (independent pass)
//! - `genai` - external semantic validator
//! - `classifier` - hybrid fusion orchestration + result cache

pub mod classifier;
pub mod context;
pub mod dataset;
pub mod features;
pub mod genai;
pub mod model;
pub mod text;
pub mod vectorize;
pub mod vocab;
