//! URL extraction and structural classification
//!
//! A link is suspicious when its host is an IP literal, a known shortener,
//! a listed abuse-heavy TLD, or - more generally - any TLD outside a small
//! safe allow-list. The allow-list generalization catches lookalike domains
//! on cheap registries without enumerating every bad TLD.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{SAFE_TLDS, SHORTENER_DOMAINS, SUSPICIOUS_TLDS};

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://\S+").unwrap());
static IP_HOST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\d{1,3}\.){3}\d{1,3}$").unwrap());

/// Structural classification of one extracted link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    IpLiteral,
    Shortener,
    SuspiciousTld,
    UncommonTld,
    Clean,
}

impl LinkClass {
    pub fn is_suspicious(&self) -> bool {
        !matches!(self, LinkClass::Clean)
    }
}

/// All URLs in the text, in order of first appearance.
pub fn extract_links(text: &str) -> Vec<String> {
    URL_RE.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Host portion of a URL: scheme stripped, path/query/fragment and port
/// removed, trailing sentence punctuation trimmed.
fn host_of(url: &str) -> String {
    let lower = url.to_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .trim_end_matches(['.', ',', ';', ':', '!', ')', ']']);
    // Port, if any. IPv6 literals don't occur in SMS scams we model.
    host.split(':').next().unwrap_or("").to_string()
}

/// Classify one URL by host structure.
pub fn classify_link(url: &str) -> LinkClass {
    let host = host_of(url);
    // A scheme with no host is malformed; fail suspicious so it still
    // earns the link boost rather than passing as clean.
    if host.is_empty() {
        return LinkClass::UncommonTld;
    }
    if IP_HOST_RE.is_match(&host) {
        return LinkClass::IpLiteral;
    }
    if SHORTENER_DOMAINS.contains(&host.as_str()) {
        return LinkClass::Shortener;
    }
    let tld = host.rsplit('.').next().unwrap_or("");
    if SUSPICIOUS_TLDS.contains(&tld) {
        return LinkClass::SuspiciousTld;
    }
    if !SAFE_TLDS.contains(&tld) {
        return LinkClass::UncommonTld;
    }
    LinkClass::Clean
}

/// True when any link in the list is structurally suspicious.
pub fn any_suspicious(links: &[String]) -> bool {
    links.iter().any(|l| classify_link(l).is_suspicious())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_in_order() {
        let text = "first https://a.com/x then HTTP://b.in/y done";
        let links = extract_links(text);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], "https://a.com/x");
        assert_eq!(links[1], "HTTP://b.in/y");
    }

    #[test]
    fn test_safe_tld_is_clean() {
        assert_eq!(classify_link("https://example.com/account"), LinkClass::Clean);
        assert_eq!(classify_link("https://sbi.in"), LinkClass::Clean);
    }

    #[test]
    fn test_ip_literal() {
        assert_eq!(classify_link("http://192.168.10.1/login"), LinkClass::IpLiteral);
        assert_eq!(classify_link("http://10.0.0.5:8080/x"), LinkClass::IpLiteral);
    }

    #[test]
    fn test_shortener() {
        assert_eq!(classify_link("https://bit.ly/3xYz"), LinkClass::Shortener);
        assert_eq!(classify_link("https://t.co/abc"), LinkClass::Shortener);
    }

    #[test]
    fn test_listed_suspicious_tld() {
        assert_eq!(classify_link("https://win-prize.xyz/claim"), LinkClass::SuspiciousTld);
        assert_eq!(classify_link("https://offer.tk"), LinkClass::SuspiciousTld);
    }

    #[test]
    fn test_uncommon_tld() {
        assert_eq!(
            classify_link("https://bank-alert.verify-login.ru/secure"),
            LinkClass::UncommonTld
        );
    }

    #[test]
    fn test_empty_host_is_suspicious() {
        assert_eq!(classify_link("http://"), LinkClass::UncommonTld);
        assert_eq!(classify_link("https:///path"), LinkClass::UncommonTld);
    }

    #[test]
    fn test_trailing_sentence_punctuation_ignored() {
        // URLs captured mid-sentence drag punctuation along with \S+.
        assert_eq!(classify_link("https://example.com."), LinkClass::Clean);
        assert_eq!(classify_link("https://example.com/x,"), LinkClass::Clean);
    }

    #[test]
    fn test_any_suspicious() {
        let clean = vec!["https://example.com/a".to_string()];
        let mixed = vec![
            "https://example.com/a".to_string(),
            "https://bit.ly/x".to_string(),
        ];
        assert!(!any_suspicious(&clean));
        assert!(any_suspicious(&mixed));
    }
}
