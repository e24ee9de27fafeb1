//! Fallback chain over several fetchers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::{FetchedPage, PageFetcher};
use crate::types::DEFAULT_MIN_PAGE_BYTES;

/// Tries an ordered list of fetchers until one returns a usable page.
///
/// A page counts as usable when the fetch succeeded, the HTTP status
/// was successful, and the body is at least `min_page_bytes` long.
/// Block pages and CAPTCHA walls are short, so the size floor catches
/// soft blocks that still come back with HTTP 200. When every fetcher
/// is exhausted the chain reports [`FetchError::Exhausted`].
pub struct FallbackFetcher {
    fetchers: Vec<Arc<dyn PageFetcher>>,
    min_page_bytes: usize,
}

impl FallbackFetcher {
    /// Create an empty chain with the default page-size floor.
    pub fn new() -> Self {
        Self {
            fetchers: Vec::new(),
            min_page_bytes: DEFAULT_MIN_PAGE_BYTES,
        }
    }

    /// Append a fetcher to the chain. Order matters; earlier fetchers
    /// are tried first.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetchers.push(fetcher);
        self
    }

    /// Override the minimum usable body size.
    pub fn with_min_page_bytes(mut self, bytes: usize) -> Self {
        self.min_page_bytes = bytes;
        self
    }

    fn usable(&self, page: &FetchedPage) -> bool {
        page.status_ok && page.html.len() >= self.min_page_bytes
    }
}

impl Default for FallbackFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for FallbackFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        for fetcher in &self.fetchers {
            match fetcher.fetch(url).await {
                Ok(page) if self.usable(&page) => {
                    debug!(url = %url, fetcher = fetcher.name(), "fallback chain succeeded");
                    return Ok(page);
                }
                Ok(page) => {
                    debug!(
                        url = %url,
                        fetcher = fetcher.name(),
                        status_ok = page.status_ok,
                        content_length = page.html.len(),
                        "page unusable, trying next fetcher"
                    );
                }
                Err(e) => {
                    warn!(url = %url, fetcher = fetcher.name(), error = %e, "fetcher failed");
                }
            }
        }

        Err(FetchError::Exhausted {
            url: url.to_string(),
        })
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
