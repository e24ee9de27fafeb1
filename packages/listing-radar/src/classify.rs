//! Heuristic rental-offer classifier.
//!
//! Mixed marketplaces list search ads, sale offers, and swap requests
//! next to genuine rental offers; this filter keeps only the latter.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters of lead text scanned for exclusion phrases.
///
/// Exclusion terms legitimately appear deep inside genuine offers
/// ("accepting offers near the current rent"), so only the title region
/// is scanned. The value is empirically tuned.
pub const DEFAULT_EXCLUSION_WINDOW: usize = 100;

/// Phrases that mark a search, sale, or swap ad rather than an offer.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "suche",
    "suchen",
    "gesucht",
    "sucht",
    "kaufen",
    "verkauf",
    "verkaufe",
    "zu verkaufen",
    "wohnungstausch",
    "tausch",
    "tausche",
];

/// Successor-tenant handover ads ("Nachmieter gesucht") are genuine
/// rental offers despite being full of search vocabulary; the indicator
/// anywhere in the text waives the exclusion scan entirely.
const CARVE_OUT_INDICATOR: &str = "nachmieter";

/// Stems that signal a rent price or rental vocabulary.
const RENT_KEYWORDS: &[&str] = &["miete", "vermiete", "vermiet"];

/// Generic housing-unit vocabulary, used as a last-resort accept.
const HOUSING_KEYWORDS: &[&str] = &["zimmer", "wohnung", "apartment", "qm", "m²", "quadratmeter"];

// Digits next to a currency symbol or word, e.g. "800€", "€ 800", "750 euro".
static CURRENCY_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\s*€|\d+\s*euro|€\s*\d+").expect("valid currency pattern"));

/// Decides whether a text block is a genuine rental offer.
///
/// Pure, deterministic, case-insensitive. Decision order:
/// 1. reject if an exclusion phrase occurs in the lead text, unless
///    "nachmieter" appears anywhere in the text,
/// 2. accept on a currency amount or a rent-keyword stem,
/// 3. accept on generic housing vocabulary,
/// 4. reject.
#[derive(Debug, Clone)]
pub struct RentalClassifier {
    exclusion_window: usize,
}

impl Default for RentalClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RentalClassifier {
    /// Create a classifier with the default exclusion window.
    pub fn new() -> Self {
        Self {
            exclusion_window: DEFAULT_EXCLUSION_WINDOW,
        }
    }

    /// Override the exclusion-scan window (in characters).
    pub fn with_exclusion_window(mut self, chars: usize) -> Self {
        self.exclusion_window = chars;
        self
    }

    /// Classify one text block.
    pub fn is_rental_listing(&self, text: &str) -> bool {
        let lower = text.to_lowercase();

        if self.lead_text_excluded(&lower) {
            return false;
        }

        let has_price = CURRENCY_AMOUNT.is_match(&lower);
        let has_rent_keyword = RENT_KEYWORDS.iter().any(|kw| lower.contains(kw));
        if has_price || has_rent_keyword {
            return true;
        }

        HOUSING_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }

    /// Scan the lead text for exclusion phrases.
    ///
    /// A "nachmieter" indicator anywhere in the text disables the scan:
    /// handover ads read like search ads ("Suche Nachmieter fuer ...")
    /// and would otherwise be rejected wholesale.
    fn lead_text_excluded(&self, lower: &str) -> bool {
        if lower.contains(CARVE_OUT_INDICATOR) {
            return false;
        }

        let window_end = byte_index_of_char(lower, self.exclusion_window);
        EXCLUDE_KEYWORDS.iter().any(|keyword| {
            lower
                .match_indices(keyword)
                .next()
                .is_some_and(|(start, _)| start < window_end)
        })
    }
}

/// Byte offset of the n-th character, clamped to the string length.
fn byte_index_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_search_ads() {
        let classifier = RentalClassifier::new();
        assert!(!classifier.is_rental_listing("Gesucht: 2-Zimmer-Wohnung"));
        assert!(!classifier.is_rental_listing("Suche Wohnung in München, bis 900€"));
        assert!(!classifier.is_rental_listing("Verkaufe Eigentumswohnung, 250.000€"));
        assert!(!classifier.is_rental_listing("Wohnungstausch: 3 Zimmer gegen 2"));
    }

    #[test]
    fn test_carve_out_accepts_successor_tenant_ads() {
        let classifier = RentalClassifier::new();
        assert!(classifier
            .is_rental_listing("Nachmieter gesucht für 3-Zimmer-Wohnung, Kaltmiete 800€"));
    }

    #[test]
    fn test_carve_out_waives_all_exclusions() {
        let classifier = RentalClassifier::new();
        // Handover ads mix search vocabulary with the indicator in
        // arbitrary order; "nachmieter" anywhere disables the scan.
        assert!(classifier.is_rental_listing("Suche dringend! Nachmieter gesucht, 800€"));
        assert!(classifier.is_rental_listing("Nachmieter dringend gesucht, Kaltmiete 800€"));
        assert!(classifier.is_rental_listing("Suche Nachmieter für 2-Zimmer-Wohnung, 750€"));
    }

    #[test]
    fn test_exclusion_only_scans_lead_text() {
        let classifier = RentalClassifier::new();
        let deep = format!(
            "Helle 2-Zimmer-Wohnung zur Miete, 75qm.{} Angebote im Bereich der aktuellen Miete gesucht.",
            " ".repeat(100)
        );
        assert!(classifier.is_rental_listing(&deep));
    }

    #[test]
    fn test_accepts_on_price_or_rent_keyword() {
        let classifier = RentalClassifier::new();
        assert!(classifier.is_rental_listing("Helle Dachwohnung, 950 € warm"));
        assert!(classifier.is_rental_listing("Vermiete Einliegerwohnung ab sofort"));
    }

    #[test]
    fn test_housing_fallback() {
        let classifier = RentalClassifier::new();
        assert!(classifier.is_rental_listing("Helles Zimmer, 18 m², Altbau"));
        assert!(!classifier.is_rental_listing("Gartenmöbel abzugeben"));
    }

    #[test]
    fn test_window_is_configurable() {
        let classifier = RentalClassifier::new().with_exclusion_window(3);
        // "gesucht" starts past a 3-char window, so it is not scanned.
        assert!(classifier.is_rental_listing("Oh, gesucht wird hier nichts: Wohnung, 700€"));
    }
}
