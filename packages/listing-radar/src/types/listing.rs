//! Listing types - raw extracted ads and their normalized form.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Maximum characters of raw text carried into a match's title snippet.
const TITLE_SNIPPET_CHARS: usize = 120;

/// A candidate ad as extracted from one fetched page.
///
/// `url` is the dedupe key within a source's result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListing {
    /// Stable source identifier, e.g. "kleinanzeigen"
    pub source_id: String,

    /// Display name of the source, e.g. "Kleinanzeigen.de"
    pub source_name: String,

    /// Absolute detail URL of the ad
    pub url: String,

    /// Display text of the ad as scraped, untouched
    pub raw_text: String,
}

impl RawListing {
    /// Create a new raw listing.
    pub fn new(
        source_id: impl Into<String>,
        source_name: impl Into<String>,
        url: impl Into<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            source_name: source_name.into(),
            url: url.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Normalize this listing's text for matching.
    pub fn into_normalized(self) -> NormalizedListing {
        let normalized_text = normalize(&self.raw_text);
        NormalizedListing {
            source_id: self.source_id,
            source_name: self.source_name,
            url: self.url,
            raw_text: self.raw_text,
            normalized_text,
        }
    }
}

/// A listing with its text canonicalized for address comparison.
///
/// Listings are append-only within a crawl run and never mutated
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedListing {
    /// Stable source identifier
    pub source_id: String,

    /// Display name of the source
    pub source_name: String,

    /// Absolute detail URL of the ad
    pub url: String,

    /// Original scraped text (postal codes are matched against this)
    pub raw_text: String,

    /// Output of [`normalize`] over `raw_text` (streets and house
    /// numbers are matched against this)
    pub normalized_text: String,
}

impl NormalizedListing {
    /// Leading slice of the raw text, for report display.
    pub fn title_snippet(&self) -> String {
        self.raw_text.chars().take(TITLE_SNIPPET_CHARS).collect()
    }
}
