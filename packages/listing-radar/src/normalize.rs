//! Text normalization for address comparison.
//!
//! Listing text and address components go through the same
//! canonicalization so substring comparisons are symmetric.

use once_cell::sync::Lazy;
use regex::Regex;

// "Hauptstr." and "Hauptstr" both mean "Hauptstrasse" in ad copy. The
// expansion runs after punctuation stripping, so the dotted form has
// already collapsed to a trailing "str" by the time it applies; doing it
// in this order keeps the function idempotent.
static STREET_ABBREV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"str(\s|$)").expect("valid street abbreviation pattern"));

/// Canonicalize free text for matching.
///
/// Lowercases, folds German umlauts to their ASCII digraphs (ä → ae,
/// ß → ss), turns hyphens into spaces, drops everything that is not
/// alphanumeric or whitespace, collapses whitespace runs, and expands
/// the "str."/"str" street abbreviation to "strasse".
///
/// Pure and total; never fails on any input. Idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue")
        .replace('ß', "ss")
        .replace('-', " ")
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    STREET_ABBREV
        .replace_all(&collapsed, "strasse${1}")
        .into_owned()
}
