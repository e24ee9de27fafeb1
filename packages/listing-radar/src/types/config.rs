//! Configuration types for sources and crawl runs.

use serde::{Deserialize, Serialize};

/// Default page budget for a quick run.
pub const QUICK_PAGE_BUDGET: u32 = 25;

/// Consecutive empty pages after which a category is considered exhausted.
pub const DEFAULT_EMPTY_PAGE_THRESHOLD: u32 = 2;

/// Responses below this size are treated as blocked or empty shell pages.
pub const DEFAULT_MIN_PAGE_BYTES: usize = 5000;

/// Inter-page delay window in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: (u64, u64) = (1000, 2500);

/// Run mode selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Bounded page budget per category
    Quick,
    /// Unbounded; only the empty-page policy stops a category
    Full,
}

/// One listing category within a source, e.g. "rental flats".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Display name, used in logs
    pub name: String,

    /// Path under the source's base URL (page-number handling is the
    /// source's concern, see `ItemExtractor::page_url`)
    pub path: String,
}

impl Category {
    /// Create a new category.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Static description of one classifieds source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier, e.g. "wg-gesucht"
    pub id: String,

    /// Display name, e.g. "WG-Gesucht.de"
    pub name: String,

    /// Scheme + host, no trailing slash
    pub base_url: String,

    /// Categories crawled in order
    pub categories: Vec<Category>,

    /// Whether candidate texts must pass the rental classifier.
    ///
    /// Mixed marketplaces (Kleinanzeigen) need it; rental-only portals
    /// (WG-Gesucht) do not.
    pub requires_rental_filter: bool,

    /// Per-source page cap, applied on top of the run policy's budget.
    ///
    /// Sources whose pagination is unreachable (single-page apps behind
    /// bot protection) set this to 1 and yield only their first page
    /// per category.
    #[serde(default)]
    pub page_limit: Option<u32>,
}

impl SourceConfig {
    /// Create a new source config with no categories.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_url: base_url.into(),
            categories: Vec::new(),
            requires_rental_filter: false,
            page_limit: None,
        }
    }

    /// Add a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Require the rental classifier for this source.
    pub fn with_rental_filter(mut self) -> Self {
        self.requires_rental_filter = true;
        self
    }

    /// Cap this source at `pages` per category regardless of run mode.
    pub fn with_page_limit(mut self, pages: u32) -> Self {
        self.page_limit = Some(pages);
        self
    }
}

/// Tuning knobs for the pagination loop.
///
/// The empty-page threshold and the short-response byte floor are
/// empirically tuned constants carried over from field use; they are
/// exposed here rather than hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlPolicy {
    /// Page budget per category; `None` means unbounded
    pub max_pages: Option<u32>,

    /// Consecutive empty pages before a category is declared done
    pub empty_page_threshold: u32,

    /// Minimum response size for a page to count as real content
    pub min_page_bytes: usize,

    /// Randomized delay window between page fetches, in milliseconds.
    /// `(0, 0)` disables the delay (used in tests).
    pub page_delay_ms: (u64, u64),
}

impl Default for CrawlPolicy {
    fn default() -> Self {
        Self::quick()
    }
}

impl CrawlPolicy {
    /// Policy for a bounded quick run.
    pub fn quick() -> Self {
        Self {
            max_pages: Some(QUICK_PAGE_BUDGET),
            empty_page_threshold: DEFAULT_EMPTY_PAGE_THRESHOLD,
            min_page_bytes: DEFAULT_MIN_PAGE_BYTES,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
        }
    }

    /// Policy for an unbounded full run.
    pub fn full() -> Self {
        Self {
            max_pages: None,
            ..Self::quick()
        }
    }

    /// Policy for a run mode.
    pub fn for_mode(mode: RunMode) -> Self {
        match mode {
            RunMode::Quick => Self::quick(),
            RunMode::Full => Self::full(),
        }
    }

    /// Override the page budget.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Override the empty-page threshold.
    pub fn with_empty_page_threshold(mut self, threshold: u32) -> Self {
        self.empty_page_threshold = threshold;
        self
    }

    /// Override the short-response floor.
    pub fn with_min_page_bytes(mut self, bytes: usize) -> Self {
        self.min_page_bytes = bytes;
        self
    }

    /// Disable the inter-page delay.
    pub fn without_delay(mut self) -> Self {
        self.page_delay_ms = (0, 0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_for_mode() {
        assert_eq!(
            CrawlPolicy::for_mode(RunMode::Quick).max_pages,
            Some(QUICK_PAGE_BUDGET)
        );
        assert_eq!(CrawlPolicy::for_mode(RunMode::Full).max_pages, None);
    }

    #[test]
    fn test_builder_overrides() {
        let policy = CrawlPolicy::quick()
            .with_max_pages(Some(3))
            .with_empty_page_threshold(1)
            .with_min_page_bytes(10)
            .without_delay();

        assert_eq!(policy.max_pages, Some(3));
        assert_eq!(policy.empty_page_threshold, 1);
        assert_eq!(policy.min_page_bytes, 10);
        assert_eq!(policy.page_delay_ms, (0, 0));
    }
}
