//! Address matching over the aggregated listing set.
//!
//! Runs once after all sources finish (or the run is cancelled). Pure
//! function of its inputs; holds no external resources and performs no
//! I/O, so it needs no locking over the finalized listing set.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::normalize::normalize;
use crate::types::{Address, Match, MatchMode, MatchTier, NormalizedListing};

// "10-16" or "10/16": a house-number range.
static HOUSE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*[-/]\s*(\d+)").expect("valid house range pattern"));

// "12a": leading number with an optional letter suffix.
static HOUSE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*([a-z])?").expect("valid house number pattern"));

/// Widest house-number range that still expands to per-number variants.
/// No real street block spans more; anything wider is treated as
/// unparseable and matched as a raw string.
const MAX_RANGE_SPAN: u32 = 100;

/// Variants of a street name to look for in normalized text.
///
/// Ads often drop the "strasse" suffix ("wohnung in der haupt 5" is
/// rare, but "hauptstr" vs "haupt" both occur), so the suffix-stripped
/// form is tried as well.
pub fn street_variants(street: &str) -> Vec<String> {
    let base = normalize(street);
    let mut variants = vec![base.clone()];
    if let Some(stripped) = base.strip_suffix("strasse") {
        let stripped = stripped.trim();
        // A street named just "Strasse" would strip to an empty string,
        // which substring-matches everything.
        if !stripped.is_empty() {
            variants.push(stripped.to_string());
        }
    }
    variants
}

/// Variants of a house number to look for in normalized text.
///
/// Ranges expand to every number sharing the parity of the range start
/// (consecutive same-side addresses step by 2); ranges wider than
/// [`MAX_RANGE_SPAN`] or with reversed bounds are left unexpanded.
/// Single numbers with a letter suffix yield the bare number plus both
/// suffix spellings. If nothing parses, the raw trimmed lowercase
/// string is the sole variant.
pub fn house_variants(house_number: &str) -> Vec<String> {
    let hn = house_number.trim().to_lowercase();
    let mut variants = Vec::new();

    if let Some(caps) = HOUSE_RANGE.captures(&hn) {
        let start: u32 = caps[1].parse().unwrap_or(0);
        let end: u32 = caps[2].parse().unwrap_or(0);
        if end >= start && end - start <= MAX_RANGE_SPAN {
            let parity = start % 2;
            for num in start..=end {
                if num % 2 == parity {
                    variants.push(num.to_string());
                }
            }
        }
    } else if let Some(caps) = HOUSE_NUMBER.captures(&hn) {
        if let Some(num) = caps.get(1) {
            let num = num.as_str();
            variants.push(num.to_string());
            if let Some(suffix) = caps.get(2) {
                variants.push(format!("{}{}", num, suffix.as_str()));
                variants.push(format!("{} {}", num, suffix.as_str()));
            }
        }
    }

    if variants.is_empty() {
        variants.push(hn);
    }
    variants
}

/// Match every listing against every address, producing tiered matches.
///
/// Deterministic given identical inputs and iteration order; running it
/// twice over an unchanged listing set yields an identical match set.
/// `MatchMode::Exact` filters extended matches out of the result; it
/// does not change how a match is classified.
pub fn match_listings(
    listings: &[NormalizedListing],
    addresses: &[Address],
    mode: MatchMode,
) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut seen: HashSet<(u64, String)> = HashSet::new();

    for address in addresses {
        let streets = street_variants(&address.street);
        let houses = house_variants(&address.house_number);
        // Word-bounded so a house number 4 does not match inside 14.
        let house_patterns: Vec<Regex> = houses
            .iter()
            .filter_map(|hv| Regex::new(&format!(r"\b{}\b", regex::escape(hv))).ok())
            .collect();

        for listing in listings {
            // Postal codes are digit runs, robust to normalization noise;
            // they are looked up in the raw text on purpose.
            if address.postal_code.is_empty() || !listing.raw_text.contains(&address.postal_code) {
                continue;
            }

            if !streets
                .iter()
                .any(|sv| listing.normalized_text.contains(sv.as_str()))
            {
                continue;
            }

            let house_found = house_patterns
                .iter()
                .any(|re| re.is_match(&listing.normalized_text));

            let tier = if house_found {
                MatchTier::Exact
            } else {
                MatchTier::Extended
            };

            if mode == MatchMode::Exact && tier == MatchTier::Extended {
                continue;
            }

            if !seen.insert((address.id, listing.url.clone())) {
                continue;
            }

            debug!(
                address_id = address.id,
                url = %listing.url,
                tier = ?tier,
                "address matched listing"
            );

            matches.push(Match {
                address_id: address.id,
                address_display: address.display_line(),
                listing_url: listing.url.clone(),
                source_id: listing.source_id.clone(),
                source_name: listing.source_name.clone(),
                title_snippet: listing.title_snippet(),
                tier,
            });
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawListing;

    fn listing(url: &str, text: &str) -> NormalizedListing {
        RawListing::new("kleinanzeigen", "Kleinanzeigen.de", url, text).into_normalized()
    }

    fn address() -> Address {
        Address::new(1, "Hauptstrasse", "5", "80331", "München")
    }

    #[test]
    fn test_street_variants_strip_suffix() {
        assert_eq!(
            street_variants("Hauptstraße"),
            vec!["hauptstrasse".to_string(), "haupt".to_string()]
        );
        assert_eq!(street_variants("Müllergasse"), vec!["muellergasse"]);
        // Degenerate street name: no empty variant.
        assert_eq!(street_variants("Strasse"), vec!["strasse"]);
    }

    #[test]
    fn test_house_variants_range_keeps_parity() {
        assert_eq!(house_variants("10-16"), vec!["10", "12", "14", "16"]);
        assert_eq!(house_variants("10/16"), vec!["10", "12", "14", "16"]);
        assert_eq!(house_variants("3-7"), vec!["3", "5", "7"]);
    }

    #[test]
    fn test_house_variants_letter_suffix() {
        assert_eq!(house_variants("12a"), vec!["12", "12a", "12 a"]);
        assert_eq!(house_variants("12 A"), vec!["12", "12a", "12 a"]);
        assert_eq!(house_variants("7"), vec!["7"]);
    }

    #[test]
    fn test_house_variants_fallback_on_unparseable() {
        assert_eq!(house_variants(" Ecke B "), vec!["ecke b"]);
    }

    #[test]
    fn test_house_variants_absurd_range_is_not_expanded() {
        // A typo'd range must not allocate billions of variants.
        assert_eq!(house_variants("2-4000000000"), vec!["2-4000000000"]);
        // Reversed bounds fall back too.
        assert_eq!(house_variants("16-10"), vec!["16-10"]);
    }

    #[test]
    fn test_exact_match() {
        let listings = [listing(
            "https://example.com/a/1",
            "Schöne Wohnung, Hauptstr. 5, 80331 München, 900€",
        )];
        let matches = match_listings(&listings, &[address()], MatchMode::Extended);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tier, MatchTier::Exact);
        assert_eq!(matches[0].address_display, "Hauptstrasse 5, 80331 München");
    }

    #[test]
    fn test_extended_match_and_exact_mode_filter() {
        let listings = [listing(
            "https://example.com/a/2",
            "Wohnung in der Hauptstr. 7, 80331 München",
        )];

        let extended = match_listings(&listings, &[address()], MatchMode::Extended);
        assert_eq!(extended.len(), 1);
        assert_eq!(extended[0].tier, MatchTier::Extended);

        let exact_only = match_listings(&listings, &[address()], MatchMode::Exact);
        assert!(exact_only.is_empty());
    }

    #[test]
    fn test_house_number_is_word_bounded() {
        // "Hauptstr. 15" contains the digit 5, but not as a word.
        let listings = [listing(
            "https://example.com/a/3",
            "Wohnung, Hauptstr. 15, 80331 München",
        )];
        let matches = match_listings(&listings, &[address()], MatchMode::Extended);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tier, MatchTier::Extended);
    }

    #[test]
    fn test_postal_code_checked_against_raw_text() {
        // Street and house number present, postal code missing.
        let listings = [listing(
            "https://example.com/a/4",
            "Wohnung, Hauptstr. 5, München",
        )];
        assert!(match_listings(&listings, &[address()], MatchMode::Extended).is_empty());
    }

    #[test]
    fn test_duplicate_pairs_suppressed_and_deterministic() {
        let l = listing(
            "https://example.com/a/5",
            "Hauptstr. 5, 80331 München, 900€",
        );
        let listings = [l.clone(), l];
        let first = match_listings(&listings, &[address()], MatchMode::Extended);
        assert_eq!(first.len(), 1);

        let second = match_listings(&listings, &[address()], MatchMode::Extended);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_same_address_on_two_sources_yields_two_matches() {
        let a = listing("https://one.example/1", "Hauptstr. 5, 80331 München, 900€");
        let mut b = listing("https://two.example/9", "Hauptstr. 5, 80331 München, 900€");
        b.source_id = "wg-gesucht".into();
        b.source_name = "WG-Gesucht.de".into();

        let matches = match_listings(&[a, b], &[address()], MatchMode::Extended);
        assert_eq!(matches.len(), 2);
        assert_ne!(matches[0].source_id, matches[1].source_id);
    }
}
