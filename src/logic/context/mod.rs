//! Context Risk Engine
//!
//! Rule-based, stateless second opinion that runs independently of the
//! learned model: lexicon hits, URL structure, and cross-sentence signal
//! adjacency produce a bounded additive boost plus named, explainable
//! signals. Never lowers the base score.
//!
//! ## Structure
//! - `lexicon` - curated multilingual term sets and TLD lists (no logic)
//! - `links` - URL extraction and structural classification
//! - `engine` - boost rules and risk-level mapping

pub mod engine;
pub mod lexicon;
pub mod links;

pub use engine::{calculate_contextual_risk, ContextResult, RiskLevel};
pub use links::{classify_link, extract_links, LinkClass};
