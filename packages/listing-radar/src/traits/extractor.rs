//! Item extractor capability - per-source selector logic.

/// One candidate ad pulled out of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    /// Display text of the ad block
    pub raw_text: String,

    /// Absolute URL of the ad's detail page
    pub detail_url: String,
}

impl ExtractedItem {
    /// Create a new extracted item.
    pub fn new(raw_text: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            detail_url: detail_url.into(),
        }
    }
}

/// Source-specific extraction logic.
///
/// An implementation owns everything only its site knows: which markup
/// blocks are ads, what a valid detail URL looks like, and how page
/// numbers are encoded in listing URLs. `extract` is a pure function of
/// the HTML.
pub trait ItemExtractor: Send + Sync {
    /// Pull candidate items out of a fetched page.
    fn extract(&self, html: &str) -> Vec<ExtractedItem>;

    /// Whether a detail URL matches this source's expected pattern.
    fn accepts_detail_url(&self, url: &str) -> bool;

    /// Build the listing-page URL for a 1-based page number.
    ///
    /// Page 1 is usually the bare category path; later pages append a
    /// page segment or query parameter in whatever form the site uses.
    fn page_url(&self, base_url: &str, category_path: &str, page_number: u32) -> String;

    /// Get the extractor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
