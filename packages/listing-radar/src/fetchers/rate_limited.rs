//! Rate-limited fetcher wrapper.
//!
//! Wraps any PageFetcher implementation with rate limiting using the
//! governor crate.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};

use crate::error::FetchResult;
use crate::traits::{FetchedPage, PageFetcher};

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A fetcher wrapper that enforces a request-rate cap.
///
/// The crawl loop's per-page jitter delay already keeps the pace polite;
/// this wrapper is the hard ceiling for fetchers shared across sources.
pub struct RateLimitedFetcher<F: PageFetcher> {
    inner: F,
    limiter: Arc<DefaultRateLimiter>,
}

impl<F: PageFetcher> RateLimitedFetcher<F> {
    /// Wrap a fetcher with a sustained requests-per-second cap.
    pub fn new(fetcher: F, requests_per_second: u32) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(requests_per_second).expect("requests_per_second must be > 0"),
        );
        Self {
            inner: fetcher,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Wrap with a custom quota.
    pub fn with_quota(fetcher: F, quota: Quota) -> Self {
        Self {
            inner: fetcher,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    async fn wait_for_permit(&self) {
        self.limiter.until_ready().await;
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for RateLimitedFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.wait_for_permit().await;
        self.inner.fetch(url).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Extension trait for easy rate limiting.
pub trait FetcherExt: PageFetcher + Sized {
    /// Wrap this fetcher with a requests-per-second cap.
    fn rate_limited(self, requests_per_second: u32) -> RateLimitedFetcher<Self> {
        RateLimitedFetcher::new(self, requests_per_second)
    }
}

impl<F: PageFetcher + Sized> FetcherExt for F {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;
    use std::time::Instant;

    #[tokio::test]
    async fn test_rate_limiting_paces_requests() {
        let mock = MockFetcher::new()
            .with_page("https://example.com/1", "x".repeat(6000))
            .with_page("https://example.com/2", "x".repeat(6000))
            .with_page("https://example.com/3", "x".repeat(6000));

        let fetcher = mock.rate_limited(2);

        let start = Instant::now();
        for url in [
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3",
        ] {
            fetcher.fetch(url).await.unwrap();
        }
        let elapsed = start.elapsed();

        // 3 requests at 2/sec: first immediate, the rest wait.
        assert!(
            elapsed.as_millis() >= 500,
            "rate limiting not pacing: {:?}",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_name_passes_through() {
        let fetcher = MockFetcher::new().rate_limited(1);
        assert_eq!(fetcher.name(), "mock");
    }
}
