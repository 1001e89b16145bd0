//! Hybrid Fusion Classifier
//!
//! Orchestrates one assessment per input: learned model -> context risk
//! engine -> optional GenAI validation -> fixed-weight fusion -> threat
//! evidence, with a fingerprint-keyed result cache bounding repeated work.
//! At most one model inference and one validator call per distinct
//! normalized text inside the TTL window.
//!
//! ## Structure
//! - `types` - RiskAssessment, ThreatDetail, Severity, stats records
//! - `cache` - TTL + size bounded result cache

pub mod cache;
pub mod types;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::constants::{
    CACHE_MAX_ENTRIES, CACHE_TTL_SECS, EXCERPT_CHARS, FUSION_GENAI_WEIGHT, FUSION_ML_WEIGHT,
    GENAI_HIGH_BAND, GENAI_LOW_BAND, SYNTH_THREAT_CUTOFF,
};
use crate::error::EngineResult;
use crate::logic::context;
use crate::logic::genai::{GenAiAnalyzer, ValidatorOutcome};
use crate::logic::model::{self, Model, MODEL_NAME};
use crate::logic::text;

use cache::ResultCache;
pub use types::{CacheStats, EngineStats, MlPrediction, ModelInfo, RiskAssessment, Severity, ThreatDetail};

pub struct HybridClassifier {
    model: Arc<Model>,
    genai: GenAiAnalyzer,
    cache: ResultCache,
    total_requests: AtomicU64,
    total_time_us: AtomicU64,
    loaded_at: DateTime<Utc>,
}

impl HybridClassifier {
    /// Compose from an already-constructed immutable model. Reload means
    /// building a new classifier around a new model value.
    pub fn new(model: Model, genai: GenAiAnalyzer) -> Self {
        log::info!(
            "Classifier ready - model={}, {} features, GenAI {}",
            MODEL_NAME,
            model.vocab.len(),
            if genai.is_available() { "enabled" } else { "disabled" }
        );
        Self {
            model: Arc::new(model),
            genai,
            cache: ResultCache::new(CACHE_MAX_ENTRIES, Duration::from_secs(CACHE_TTL_SECS)),
            total_requests: AtomicU64::new(0),
            total_time_us: AtomicU64::new(0),
            loaded_at: Utc::now(),
        }
    }

    /// Standard startup path: load the artifact (or train from the canonical
    /// dataset) and wire the validator from the environment.
    pub fn bootstrap(model_path: &Path, dataset_path: &Path) -> EngineResult<Self> {
        let model = model::load_or_train(model_path, dataset_path)?;
        Ok(Self::new(model, GenAiAnalyzer::from_env()))
    }

    /// Bootstrap with paths taken from the environment (or their defaults).
    pub fn bootstrap_default() -> EngineResult<Self> {
        Self::bootstrap(
            Path::new(&crate::constants::get_model_path()),
            Path::new(&crate::constants::get_dataset_path()),
        )
    }

    /// Direct model surface: probability projected to 0-100 with the tuned
    /// decision threshold applied.
    pub fn predict(&self, text: &str) -> MlPrediction {
        let prob = self.model.predict_proba(text);
        MlPrediction {
            risk_score: (prob * 100.0).round() as u8,
            is_phishing: prob >= self.model.threshold,
            confidence: prob,
            model: MODEL_NAME.to_string(),
        }
    }

    /// One fused assessment for one text.
    pub async fn classify(&self, raw_text: &str) -> RiskAssessment {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        let start = Instant::now();

        if text::validate_length(raw_text).is_err() {
            return RiskAssessment::rejected();
        }

        let key = text::fingerprint(raw_text);
        if let Some(mut hit) = self.cache.get(&key) {
            let elapsed = start.elapsed();
            hit.processing_time_ms = elapsed.as_secs_f64() * 1000.0;
            hit.cached = true;
            self.total_time_us.fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
            return hit;
        }

        // Learned score, then the independent context pass over the raw text.
        let ml_prob = self.model.predict_proba(raw_text);
        let ml_score = (ml_prob * 100.0).round() as u8;

        let links = context::extract_links(raw_text);
        let ctx = context::calculate_contextual_risk(raw_text, &[], Some(&links), ml_prob);
        let boosted_score = (ctx.risk_score * 100.0).round() as u8;

        let mut genai_score: Option<u8> = None;
        let mut threats: Vec<ThreatDetail> = Vec::new();

        // Second opinion only when the learned score is high-ish or
        // borderline-low; the broad middle is skipped. Tunable policy.
        if self.genai.is_available() && (ml_score >= GENAI_HIGH_BAND || ml_score <= GENAI_LOW_BAND) {
            if let ValidatorOutcome::Verdict(verdict) = self.genai.analyze(raw_text).await {
                genai_score = Some(verdict.risk_score);
                for tactic in &verdict.tactics {
                    threats.push(ThreatDetail {
                        phrase: tactic.clone(),
                        risk: verdict.risk_score,
                        category: "genai_detected".to_string(),
                        explanation: verdict.explanation.clone(),
                    });
                }
            }
        }

        let overall_risk = fuse_scores(boosted_score, genai_score);
        let severity = Severity::from_score(overall_risk);

        if threats.is_empty() && overall_risk >= SYNTH_THREAT_CUTOFF {
            threats.push(ThreatDetail {
                phrase: raw_text.chars().take(EXCERPT_CHARS).collect(),
                risk: overall_risk,
                category: "ml_detected".to_string(),
                explanation:
                    "Message matches multilingual phishing patterns learned by the classifier."
                        .to_string(),
            });
        }

        let elapsed = start.elapsed();
        let assessment = RiskAssessment {
            overall_risk,
            severity,
            risk_level: ctx.risk_level,
            threats,
            method: if genai_score.is_some() { "ml+genai" } else { "ml" }.to_string(),
            ml_score,
            genai_score,
            context_boost: ctx.context_boost,
            detected_signals: ctx.detected_signals,
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
            cached: false,
        };

        self.total_time_us.fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        // Publish before returning so concurrent duplicates resolve from here.
        self.cache.insert(key, assessment.clone());
        assessment
    }

    /// Ordered, independent evaluation of a batch; one assessment per input.
    pub async fn batch_classify(&self, texts: &[String]) -> Vec<RiskAssessment> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.classify(text).await);
        }
        out
    }

    pub fn get_stats(&self) -> EngineStats {
        let requests = self.total_requests.load(Ordering::Relaxed);
        let avg_ms = if requests > 0 {
            let total_ms = self.total_time_us.load(Ordering::Relaxed) as f64 / 1000.0;
            ((total_ms / requests as f64) * 10.0).round() / 10.0
        } else {
            0.0
        };

        EngineStats {
            total_requests: requests,
            avg_response_time_ms: avg_ms,
            genai_available: self.genai.is_available(),
            model: ModelInfo {
                name: MODEL_NAME.to_string(),
                vocab_size: self.model.vocab.len(),
                threshold: self.model.threshold,
                loaded_at: self.loaded_at,
            },
            cache: self.cache.stats(),
        }
    }
}

/// Fixed-weight fusion: 0.6 x learned+context, 0.4 x validator when a
/// verdict exists, else the learned+context score alone.
pub fn fuse_scores(ml_score: u8, genai_score: Option<u8>) -> u8 {
    match genai_score {
        Some(g) => (ml_score as f64 * FUSION_ML_WEIGHT + g as f64 * FUSION_GENAI_WEIGHT) as u8,
        None => ml_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::context::RiskLevel;
    use crate::logic::model::train::{fit, TrainConfig};

    fn test_classifier() -> HybridClassifier {
        let texts: Vec<String> = [
            ("urgent share your otp now account blocked", 1u8),
            ("verify account password turant kyc expire", 1),
            ("otp password share karo bank alert turant", 1),
            ("click link verify otp urgent bank account", 1),
            ("kal meeting hai 3 baje office", 0),
            ("movie dekhne chalte hain weekend", 0),
            ("lunch at noon with the team", 0),
            ("project update shared in the doc", 0),
        ]
        .iter()
        .map(|(t, _)| t.to_string())
        .collect();
        let labels = vec![1, 1, 1, 1, 0, 0, 0, 0];
        let model = fit(&texts, &labels, &TrainConfig::default());
        HybridClassifier::new(model, GenAiAnalyzer::disabled())
    }

    #[tokio::test]
    async fn test_classify_is_idempotent_and_caches() {
        let clf = test_classifier();
        let first = clf.classify("Password share karo turant!").await;
        let second = clf.classify("Password share karo turant!").await;

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.overall_risk, second.overall_risk);
        assert_eq!(clf.get_stats().cache.hits, 1);
    }

    #[tokio::test]
    async fn test_cache_key_ignores_formatting() {
        let clf = test_classifier();
        let _ = clf.classify("Share OTP now").await;
        let reformatted = clf.classify("  share   otp NOW ").await;
        assert!(reformatted.cached);
    }

    #[tokio::test]
    async fn test_phishing_scenario_scores_high() {
        let clf = test_classifier();
        let a = clf.classify("Password share karo turant!").await;
        assert!(a.overall_risk >= SYNTH_THREAT_CUTOFF);
        assert_ne!(a.risk_level, RiskLevel::Safe);
        assert_eq!(a.method, "ml");
        assert!(!a.threats.is_empty()); // synthesized evidence
        assert_eq!(a.threats[0].category, "ml_detected");
    }

    #[tokio::test]
    async fn test_benign_scenario_scores_safe() {
        let clf = test_classifier();
        let a = clf.classify("Kal meeting hai 3 baje.").await;
        assert_eq!(a.risk_level, RiskLevel::Safe);
        assert_eq!(a.context_boost, 0.0);
        assert!(a.detected_signals.is_empty());
        assert!(a.threats.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_not_scored() {
        let clf = test_classifier();
        let empty = clf.classify("").await;
        assert_eq!(empty.method, "error");
        assert_eq!(empty.overall_risk, 0);

        let oversized = "x".repeat(6000);
        let big = clf.classify(&oversized).await;
        assert_eq!(big.method, "error");
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_independence() {
        let clf = test_classifier();
        let texts = vec![
            "urgent otp verify bank account turant".to_string(),
            "kal office meeting hai".to_string(),
        ];
        let results = clf.batch_classify(&texts).await;
        assert_eq!(results.len(), 2);
        assert!(results[0].overall_risk > results[1].overall_risk);
    }

    #[tokio::test]
    async fn test_stats_counters() {
        let clf = test_classifier();
        let _ = clf.classify("some message one").await;
        let _ = clf.classify("some message two").await;
        let stats = clf.get_stats();
        assert_eq!(stats.total_requests, 2);
        assert!(!stats.genai_available);
        assert_eq!(stats.model.name, MODEL_NAME);
        assert!(stats.model.vocab_size > 0);
    }

    #[test]
    fn test_fuse_scores() {
        assert_eq!(fuse_scores(50, None), 50);
        assert_eq!(fuse_scores(50, Some(100)), 70);
        assert_eq!(fuse_scores(100, Some(0)), 60);
        // Truncating, matching the integer projection contract
        assert_eq!(fuse_scores(33, Some(9)), 23);
    }

    #[test]
    fn test_predict_surface() {
        let clf = test_classifier();
        let p = clf.predict("urgent otp verify bank");
        assert!(p.risk_score <= 100);
        assert!((0.0..=1.0).contains(&p.confidence));
        assert_eq!(p.model, MODEL_NAME);

        let benign = clf.predict("office meeting at noon");
        assert!(p.risk_score > benign.risk_score);
    }
}
