//! Context lexicons and domain lists
//!
//! Curated term sets only - no logic here. Matching is substring-based on
//! lowercased text, so every entry must already be lowercase. Sets mix
//! native scripts, Romanized transliteration, and leetspeak variants to
//! stay useful on code-mixed messages.

/// Urgency / time-pressure language
pub const URGENCY_TERMS: &[&str] = &[
    "urgent",
    "immediately",
    "now",
    "final warning",
    "turant",
    "jaldi",
    "तुरंत",
    "இப்போது",
    "এখনই",
    "urg3nt",
];

/// Impersonation / authority claims
pub const IMPERSONATION_TERMS: &[&str] = &[
    "bank",
    "rbi",
    "sbi",
    "hdfc",
    "icici",
    "income tax",
    "support team",
    "security desk",
];

/// Credential-harvesting language
pub const CREDENTIAL_TERMS: &[&str] = &[
    "otp",
    "password",
    "pin",
    "cvv",
    "credential",
    "verify account",
    "kyc",
    "aadhar",
];

/// Known link-shortener hosts
pub const SHORTENER_DOMAINS: &[&str] = &["bit.ly", "tinyurl.com", "t.co", "goo.gl"];

/// TLDs with heavy abuse observed in SMS scams
pub const SUSPICIOUS_TLDS: &[&str] = &["top", "xyz", "click", "gq", "tk", "work", "fit"];

/// Safe top-level labels; anything outside this list counts as uncommon
pub const SAFE_TLDS: &[&str] = &["com", "in", "org", "net", "edu", "gov"];

/// Substring membership test against a term set. `text` must be lowercased.
pub fn has_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| text.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliteration_and_script_variants_hit() {
        assert!(has_any("password share karo turant", URGENCY_TERMS));
        assert!(has_any("तुरंत भेजो", URGENCY_TERMS));
        assert!(has_any("apna otp batao", CREDENTIAL_TERMS));
    }

    #[test]
    fn test_benign_text_has_no_hits() {
        let text = "kal meeting hai 3 baje";
        assert!(!has_any(text, URGENCY_TERMS));
        assert!(!has_any(text, IMPERSONATION_TERMS));
        assert!(!has_any(text, CREDENTIAL_TERMS));
    }

    #[test]
    fn test_all_terms_are_lowercase() {
        for set in [URGENCY_TERMS, IMPERSONATION_TERMS, CREDENTIAL_TERMS] {
            for term in set {
                assert_eq!(*term, term.to_lowercase());
            }
        }
    }
}
