//! Contextual risk calculation
//!
//! Pure function of (text, pre-existing signals, links, base score). Boost
//! rules are additive and independently triggerable; the result is clamped
//! to [0, 1] and mapped onto a four-tier risk level. The raw boost is
//! reported separately from the fused score so callers can attribute risk
//! to context vs. the learned model.

use serde::{Deserialize, Serialize};

use super::lexicon::{has_any, CREDENTIAL_TERMS, IMPERSONATION_TERMS, URGENCY_TERMS};
use super::links;

// ============================================================================
// BOOST RULES
// ============================================================================

/// Urgency language together with at least one link
pub const URGENCY_LINK_BOOST: f64 = 0.08;

/// Impersonation and credential-harvesting language co-occurring
pub const IMPERSONATION_CREDENTIAL_BOOST: f64 = 0.12;

/// Any structurally suspicious URL
pub const SUSPICIOUS_URL_BOOST: f64 = 0.10;

/// Adjacent sentences pairing urgency/impersonation with credential terms
pub const ADJACENT_SIGNALS_BOOST: f64 = 0.07;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Four-tier step function of the final score. Boundaries are inclusive on
/// the lower tier: 0.30 is still SAFE, 0.55 still SUSPICIOUS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Suspicious,
    HighRisk,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score <= 0.30 {
            RiskLevel::Safe
        } else if score <= 0.55 {
            RiskLevel::Suspicious
        } else if score <= 0.80 {
            RiskLevel::HighRisk
        } else {
            RiskLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::Suspicious => "SUSPICIOUS",
            RiskLevel::HighRisk => "HIGH RISK",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the context engine
#[derive(Debug, Clone, Serialize)]
pub struct ContextResult {
    /// Final score: clamp(base + boosts, 0, 1)
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// Deduplicated, sorted signal names (pre-existing + engine-detected)
    pub detected_signals: Vec<String>,
    /// Raw boost magnitude, separate from the fused score
    pub context_boost: f64,
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Boost and explain a base risk score using lexical and structural signals.
///
/// `links` may be `None`, in which case they are extracted from the text.
pub fn calculate_contextual_risk(
    text: &str,
    detected_features: &[String],
    links: Option<&[String]>,
    base_score: f64,
) -> ContextResult {
    let text_l = text.to_lowercase();
    let extracted;
    let links: &[String] = match links {
        Some(l) => l,
        None => {
            extracted = links::extract_links(text);
            &extracted
        }
    };

    let mut boosts = 0.0f64;
    let mut signals: Vec<String> = detected_features.to_vec();

    let urgency = has_any(&text_l, URGENCY_TERMS);
    let impersonation = has_any(&text_l, IMPERSONATION_TERMS);
    let credential_req = has_any(&text_l, CREDENTIAL_TERMS);
    let suspicious_url = links::any_suspicious(links);

    if urgency && !links.is_empty() {
        boosts += URGENCY_LINK_BOOST;
        signals.push("Urgency with link".to_string());
    }

    if impersonation && credential_req {
        boosts += IMPERSONATION_CREDENTIAL_BOOST;
        signals.push("Impersonation + credential request".to_string());
    }

    if suspicious_url {
        boosts += SUSPICIOUS_URL_BOOST;
        signals.push("Suspicious URL structure".to_string());
    }

    // Cross-sentence adjacency: a setup sentence followed by the ask.
    // Counted at most once; first match wins.
    let sentences: Vec<&str> = text_l
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    for pair in sentences.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let ask = has_any(b, CREDENTIAL_TERMS);
        if ask && (has_any(a, URGENCY_TERMS) || has_any(a, IMPERSONATION_TERMS)) {
            boosts += ADJACENT_SIGNALS_BOOST;
            signals.push("Adjacent scam signals".to_string());
            break;
        }
    }

    signals.sort();
    signals.dedup();

    let final_score = (base_score + boosts).clamp(0.0, 1.0);
    ContextResult {
        risk_score: round4(final_score),
        risk_level: RiskLevel::from_score(final_score),
        detected_signals: signals,
        context_boost: round4(boosts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_breakpoints() {
        assert_eq!(RiskLevel::from_score(0.30), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_score(0.31), RiskLevel::Suspicious);
        assert_eq!(RiskLevel::from_score(0.55), RiskLevel::Suspicious);
        assert_eq!(RiskLevel::from_score(0.56), RiskLevel::HighRisk);
        assert_eq!(RiskLevel::from_score(0.80), RiskLevel::HighRisk);
        assert_eq!(RiskLevel::from_score(0.81), RiskLevel::Critical);
    }

    #[test]
    fn test_benign_text_has_zero_boost() {
        let r = calculate_contextual_risk("Kal meeting hai 3 baje.", &[], None, 0.1);
        assert_eq!(r.context_boost, 0.0);
        assert!(r.detected_signals.is_empty());
        assert_eq!(r.risk_level, RiskLevel::Safe);
        assert!((r.risk_score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_boost_never_lowers_base_score() {
        for base in [0.0, 0.2, 0.5, 0.9, 1.0] {
            let r = calculate_contextual_risk("anything at all", &[], None, base);
            assert!(r.risk_score >= base - 1e-9);
            assert!(r.context_boost >= 0.0);
        }
    }

    #[test]
    fn test_urgency_with_link() {
        let r = calculate_contextual_risk(
            "Account verify karo turant https://example.com/login",
            &[],
            None,
            0.0,
        );
        assert!(r.detected_signals.contains(&"Urgency with link".to_string()));
        assert!((r.context_boost - URGENCY_LINK_BOOST).abs() < 1e-9);
    }

    #[test]
    fn test_urgency_without_link_is_not_boosted() {
        let r = calculate_contextual_risk("Password share karo turant!", &[], None, 0.0);
        assert!(!r.detected_signals.contains(&"Urgency with link".to_string()));
        assert_eq!(r.context_boost, 0.0);
    }

    #[test]
    fn test_impersonation_plus_credential() {
        let r = calculate_contextual_risk("SBI bank se bol rahe hain, OTP batao", &[], None, 0.0);
        assert!(r
            .detected_signals
            .contains(&"Impersonation + credential request".to_string()));
        assert!((r.context_boost - IMPERSONATION_CREDENTIAL_BOOST).abs() < 1e-9);
    }

    #[test]
    fn test_clean_com_url_is_not_flagged() {
        let r = calculate_contextual_risk("details: https://example.com/account", &[], None, 0.0);
        assert!(!r
            .detected_signals
            .contains(&"Suspicious URL structure".to_string()));
    }

    #[test]
    fn test_uncommon_tld_is_flagged() {
        let r = calculate_contextual_risk(
            "login here https://bank-alert.verify-login.ru/secure",
            &[],
            None,
            0.0,
        );
        assert!(r
            .detected_signals
            .contains(&"Suspicious URL structure".to_string()));
        assert!(r.risk_score >= SUSPICIOUS_URL_BOOST - 1e-9);
    }

    #[test]
    fn test_adjacent_signals_counted_once() {
        let text = "Turant call karo. OTP batao. Bank se hain. PIN bhejo.";
        let r = calculate_contextual_risk(text, &[], None, 0.0);
        let adjacent = r
            .detected_signals
            .iter()
            .filter(|s| s.as_str() == "Adjacent scam signals")
            .count();
        assert_eq!(adjacent, 1);
    }

    #[test]
    fn test_boosts_are_additive_and_clamped() {
        let text = "URGENT! Bank security desk here. Share your OTP now at http://192.168.1.1/verify";
        let r = calculate_contextual_risk(text, &[], None, 0.95);
        // urgency+link, impersonation+credential, suspicious URL, adjacency
        assert!(r.context_boost >= 0.30 - 1e-9);
        assert_eq!(r.risk_score, 1.0);
        assert_eq!(r.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_signals_sorted_and_deduplicated() {
        let pre = vec![
            "Urgency with link".to_string(),
            "zz-custom".to_string(),
        ];
        let r = calculate_contextual_risk(
            "turant verify karo https://x.top/a",
            &pre,
            None,
            0.0,
        );
        let mut sorted = r.detected_signals.clone();
        sorted.sort();
        assert_eq!(r.detected_signals, sorted);
        let dup = r
            .detected_signals
            .iter()
            .filter(|s| s.as_str() == "Urgency with link")
            .count();
        assert_eq!(dup, 1);
    }
}
