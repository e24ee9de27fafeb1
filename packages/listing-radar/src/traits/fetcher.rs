//! Page fetcher capability.

use async_trait::async_trait;

use crate::error::FetchResult;

/// One fetched listing page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Response body
    pub html: String,

    /// Whether the transport reported success (2xx)
    pub status_ok: bool,
}

impl FetchedPage {
    /// Create a successful page.
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            status_ok: true,
        }
    }

    /// Mark the page as a transport-level failure.
    pub fn with_status_ok(mut self, status_ok: bool) -> Self {
        self.status_ok = status_ok;
        self
    }
}

/// Fetcher trait for retrieving listing pages.
///
/// Implementations must enforce their own timeout and surface failure as
/// an error; the crawl loop treats failures as empty pages and retries
/// nothing itself. Wrappers compose: see `RateLimitedFetcher` and
/// `FallbackFetcher`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single page by URL.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<F> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        (**self).fetch(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
