//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the engine
//! without making real network calls.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::traits::{FetchedPage, LogSink, PageFetcher, ProgressSink};

/// A mock page fetcher for testing.
///
/// Returns deterministic, configurable responses per URL. URLs without
/// a configured response come back as an unusable stub page (short body,
/// `status_ok == false`), the shape a blocked crawl would see.
#[derive(Default)]
pub struct MockFetcher {
    /// Predefined pages by URL
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,

    /// URLs that should fail with an error instead of a page
    failures: Arc<RwLock<HashMap<String, MockFailure>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<String>>>,
}

/// Failure kind for a configured URL.
#[derive(Debug, Clone, Copy)]
pub enum MockFailure {
    Timeout,
    Blocked,
}

impl MockFetcher {
    /// Create a new mock fetcher with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined successful page for a URL.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.into(), FetchedPage::new(html));
        self
    }

    /// Add a predefined page with full control over its fields.
    pub fn with_response(self, url: impl Into<String>, page: FetchedPage) -> Self {
        self.pages.write().unwrap().insert(url.into(), page);
        self
    }

    /// Make a URL fail with an error.
    pub fn with_failure(self, url: impl Into<String>, failure: MockFailure) -> Self {
        self.failures.write().unwrap().insert(url.into(), failure);
        self
    }

    /// All URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(failure) = self.failures.read().unwrap().get(url) {
            return Err(match failure {
                MockFailure::Timeout => FetchError::Timeout {
                    url: url.to_string(),
                },
                MockFailure::Blocked => FetchError::Blocked {
                    url: url.to_string(),
                },
            });
        }

        if let Some(page) = self.pages.read().unwrap().get(url) {
            return Ok(page.clone());
        }

        Ok(FetchedPage::new("blocked").with_status_ok(false))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Progress sink that records every report.
#[derive(Default)]
pub struct RecordingProgress {
    reports: Arc<RwLock<Vec<(u32, Option<u32>)>>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(page_number, page_max)` reports received so far.
    pub fn reports(&self) -> Vec<(u32, Option<u32>)> {
        self.reports.read().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, page_number: u32, page_max: Option<u32>) {
        self.reports.write().unwrap().push((page_number, page_max));
    }
}

/// Log sink that records every line.
#[derive(Default)]
pub struct RecordingLog {
    lines: Arc<RwLock<Vec<String>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All log lines received so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.read().unwrap().clone()
    }
}

impl LogSink for RecordingLog {
    fn log(&self, message: &str) {
        self.lines.write().unwrap().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_configured_page() {
        let fetcher = MockFetcher::new().with_page("https://example.com/a", "<html>ok</html>");

        let page = fetcher.fetch("https://example.com/a").await.unwrap();
        assert!(page.status_ok);
        assert_eq!(page.html, "<html>ok</html>");
        assert_eq!(fetcher.calls(), vec!["https://example.com/a"]);
    }

    #[tokio::test]
    async fn test_mock_fetcher_default_is_unusable() {
        let fetcher = MockFetcher::new();
        let page = fetcher.fetch("https://example.com/unknown").await.unwrap();
        assert!(!page.status_ok);
    }

    #[tokio::test]
    async fn test_mock_fetcher_failure() {
        let fetcher =
            MockFetcher::new().with_failure("https://example.com/t", MockFailure::Timeout);
        let err = fetcher.fetch("https://example.com/t").await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }
}
