//! GenAI semantic validator client
//!
//! Second-opinion scoring over the Anthropic messages API. The fusion layer
//! only ever sees `ValidatorOutcome`: every failure mode - disabled, missing
//! key, timeout, HTTP error, malformed JSON, missing fields, out-of-range
//! score - collapses to `Unavailable` so no error crosses the boundary.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::constants;

const ANTHROPIC_VERSION: &str = "2023-06-01";

const SYSTEM_PROMPT: &str = "You are SurakshaAI, a phishing detection expert specializing in \
multilingual Indian code-mixed messages (English + 22 official Indian languages). Analyze the \
given message for phishing indicators.\n\nYou MUST respond with valid JSON only - no other text. \
Use this exact schema:\n\n{\n  \"risk_score\": <int 0-100>,\n  \"is_phishing\": <bool>,\n  \
\"tactics\": [<list of tactic strings detected>],\n  \"explanation_hinglish\": \"<2-3 sentence \
explanation in Hinglish>\",\n  \"confidence\": <float 0.0-1.0>\n}\n\nDetection guidelines:\n\
- Urgency tactics: \"turant\", \"abhi\", \"jaldi\", time pressure\n\
- Credential harvesting: requesting password, OTP, PIN, CVV\n\
- Impersonation: pretending to be bank, government, police, RBI\n\
- Fear/threats: account block, arrest, legal action, FIR\n\
- Too-good-to-be-true: lottery, prize, free gifts\n\
- Money requests: processing fee, registration fee, advance payment\n\
- Personal info requests: Aadhar, PAN, bank account number\n\
- Suspicious links: shortened URLs, unknown domains\n\n\
Handle all 22 official Indian languages and code-mixed Romanized writing. Treat semantic \
equivalents of OTP/password/KYC/account block across these languages as suspicious.";

/// Validated structured result from the external validator
#[derive(Debug, Clone)]
pub struct GenAiVerdict {
    pub risk_score: u8,
    pub is_phishing: bool,
    pub tactics: Vec<String>,
    pub explanation: String,
    pub confidence: f64,
}

/// What fusion pattern-matches on. Any failure is `Unavailable`, with no
/// differentiation beyond logging.
#[derive(Debug, Clone)]
pub enum ValidatorOutcome {
    Verdict(GenAiVerdict),
    Unavailable,
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    risk_score: f64,
    is_phishing: bool,
    tactics: Vec<String>,
    explanation_hinglish: String,
    confidence: f64,
}

pub struct GenAiAnalyzer {
    client: Option<reqwest::Client>,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl GenAiAnalyzer {
    /// Build from environment: requires `ANTHROPIC_API_KEY` and `ENABLE_GENAI`
    /// not set to false.
    pub fn from_env() -> Self {
        let api_key = constants::get_genai_api_key();
        let enabled = constants::is_genai_enabled();
        let timeout = constants::get_genai_timeout();

        let client = if api_key.is_some() && enabled {
            match reqwest::Client::builder().timeout(timeout).build() {
                Ok(c) => {
                    log::info!("GenAI validator initialized");
                    Some(c)
                }
                Err(e) => {
                    log::warn!("GenAI client build failed, validator disabled: {}", e);
                    None
                }
            }
        } else {
            log::warn!(
                "GenAI validator disabled - {}",
                if api_key.is_none() { "no API key" } else { "disabled by config" }
            );
            None
        };

        Self {
            client,
            api_key,
            model: constants::DEFAULT_GENAI_MODEL.to_string(),
            timeout,
        }
    }

    /// A validator that is never available. Used when callers want pure
    /// learned-model behavior, and in tests.
    pub fn disabled() -> Self {
        Self {
            client: None,
            api_key: None,
            model: constants::DEFAULT_GENAI_MODEL.to_string(),
            timeout: Duration::from_secs(constants::DEFAULT_GENAI_TIMEOUT_SECS),
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Ask the validator for a verdict on one text.
    pub async fn analyze(&self, text: &str) -> ValidatorOutcome {
        let (client, api_key) = match (&self.client, &self.api_key) {
            (Some(c), Some(k)) => (c, k),
            _ => {
                log::debug!("GenAI not available, skipping analysis");
                return ValidatorOutcome::Unavailable;
            }
        };

        let body = json!({
            "model": self.model,
            "max_tokens": 512,
            "system": SYSTEM_PROMPT,
            "messages": [{
                "role": "user",
                "content": format!("Analyze this message for phishing:\n\n\"{}\"\n\nRespond with JSON only.", text),
            }],
        });

        let response = match client
            .post(constants::GENAI_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    log::warn!("GenAI request timed out after {:?}", self.timeout);
                } else {
                    log::warn!("GenAI request failed: {}", e);
                }
                return ValidatorOutcome::Unavailable;
            }
        };

        if !response.status().is_success() {
            log::warn!("GenAI request rejected: HTTP {}", response.status());
            return ValidatorOutcome::Unavailable;
        }

        let payload: serde_json::Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                log::warn!("GenAI response body unreadable: {}", e);
                return ValidatorOutcome::Unavailable;
            }
        };

        let raw = payload
            .get("content")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("text"))
            .and_then(|t| t.as_str())
            .unwrap_or("");

        match parse_verdict(raw) {
            Some(verdict) => {
                log::info!(
                    "GenAI analysis complete - risk_score={}, confidence={:.2}",
                    verdict.risk_score,
                    verdict.confidence
                );
                ValidatorOutcome::Verdict(verdict)
            }
            None => ValidatorOutcome::Unavailable,
        }
    }
}

/// Parse and validate the model's JSON reply. Markdown code fences are
/// stripped first; missing fields or an out-of-range score reject the whole
/// reply rather than guessing.
pub fn parse_verdict(raw: &str) -> Option<GenAiVerdict> {
    let trimmed = raw.trim();
    let unfenced = if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() > 2 {
            lines[1..lines.len() - 1].join("\n")
        } else {
            trimmed.to_string()
        }
    } else {
        trimmed.to_string()
    };

    let raw_verdict: RawVerdict = match serde_json::from_str(&unfenced) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Failed to parse GenAI response as verdict JSON: {}", e);
            return None;
        }
    };

    if !(0.0..=100.0).contains(&raw_verdict.risk_score) {
        log::warn!("Invalid risk_score from GenAI: {}", raw_verdict.risk_score);
        return None;
    }
    if !(0.0..=1.0).contains(&raw_verdict.confidence) {
        log::warn!("Invalid confidence from GenAI: {}", raw_verdict.confidence);
        return None;
    }

    Some(GenAiVerdict {
        risk_score: raw_verdict.risk_score.round() as u8,
        is_phishing: raw_verdict.is_phishing,
        tactics: raw_verdict.tactics,
        explanation: raw_verdict.explanation_hinglish,
        confidence: raw_verdict.confidence,
    })
}
