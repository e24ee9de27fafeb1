//! Page fetcher implementations.
//!
//! [`HttpFetcher`] is the workhorse; [`FallbackFetcher`] chains several
//! fetchers so a blocked primary degrades instead of failing the run;
//! [`RateLimitedFetcher`] wraps any fetcher with a request-rate cap.

pub mod fallback;
pub mod http;
pub mod rate_limited;

pub use fallback::FallbackFetcher;
pub use http::HttpFetcher;
pub use rate_limited::{FetcherExt, RateLimitedFetcher};
