//! Match output types.

use serde::{Deserialize, Serialize};

/// How confident a match is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// Postal code, street, and house number all found in the listing
    Exact,
    /// Postal code and street found; house number not found
    Extended,
}

/// Which matches a run should report.
///
/// The mode filters results; it never changes how a match is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Report only exact matches
    Exact,
    /// Report exact and extended matches
    Extended,
}

/// A listing that references a known address.
///
/// Produced only by the matching pass; immutable; unique per
/// `(address_id, listing_url)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Id of the matched address in the caller's address book
    pub address_id: u64,

    /// Human-readable form of the matched address, for reports
    pub address_display: String,

    /// Detail URL of the matching listing
    pub listing_url: String,

    /// Source the listing came from
    pub source_id: String,

    /// Display name of that source
    pub source_name: String,

    /// Leading slice of the listing's raw text
    pub title_snippet: String,

    /// Confidence tier
    pub tier: MatchTier,
}
