//! Classifier result types
//!
//! Fixed-field tagged records only - no logic beyond tier mapping. Score
//! fields use the 0-100 integer projection; probability components stay
//! float where attribution needs them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{SEVERITY_CRITICAL_MIN, SEVERITY_HIGH_MIN, SEVERITY_MEDIUM_MIN};
use crate::logic::context::RiskLevel;

/// Severity tier on the 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_score(score: u8) -> Self {
        if score < SEVERITY_MEDIUM_MIN {
            Severity::Low
        } else if score < SEVERITY_HIGH_MIN {
            Severity::Medium
        } else if score < SEVERITY_CRITICAL_MIN {
            Severity::High
        } else {
            Severity::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One piece of threat evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatDetail {
    /// Offending phrase, tactic, or text excerpt
    pub phrase: String,
    /// Risk contribution (0-100)
    pub risk: u8,
    /// Category tag: "genai_detected", "ml_detected", ...
    pub category: String,
    /// Human explanation
    pub explanation: String,
}

/// One fused risk verdict for one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Fused risk score, 0-100
    pub overall_risk: u8,
    pub severity: Severity,
    /// Four-tier level of the learned+context score
    pub risk_level: RiskLevel,
    pub threats: Vec<ThreatDetail>,
    /// Fusion method used: "ml", "ml+genai", or "error"
    pub method: String,
    /// Learned-model component (0-100, before context boost)
    pub ml_score: u8,
    /// Validator component, when one was obtained
    pub genai_score: Option<u8>,
    /// Raw context boost on the probability scale
    pub context_boost: f64,
    /// Named context signals, sorted and deduplicated
    pub detected_signals: Vec<String>,
    pub processing_time_ms: f64,
    pub cached: bool,
}

impl RiskAssessment {
    /// Zero, non-throwing assessment for input that failed validation.
    pub fn rejected() -> Self {
        Self {
            overall_risk: 0,
            severity: Severity::Low,
            risk_level: RiskLevel::Safe,
            threats: Vec::new(),
            method: "error".to_string(),
            ml_score: 0,
            genai_score: None,
            context_boost: 0.0,
            detected_signals: Vec::new(),
            processing_time_ms: 0.0,
            cached: false,
        }
    }
}

/// Direct model surface consumed by the request layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlPrediction {
    pub risk_score: u8,
    pub is_phishing: bool,
    pub confidence: f64,
    pub model: String,
}

/// Cache introspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Loaded-model identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub vocab_size: usize,
    pub threshold: f64,
    pub loaded_at: DateTime<Utc>,
}

/// Aggregate counters for the stats/introspection surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    pub total_requests: u64,
    pub avg_response_time_ms: f64,
    pub genai_available: bool,
    pub model: ModelInfo,
    pub cache: CacheStats,
}
