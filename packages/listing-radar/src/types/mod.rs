//! Data types for the crawl-and-match engine.

pub mod address;
pub mod config;
pub mod listing;
pub mod matches;

pub use address::Address;
pub use config::{
    Category, CrawlPolicy, RunMode, SourceConfig, DEFAULT_EMPTY_PAGE_THRESHOLD,
    DEFAULT_MIN_PAGE_BYTES, DEFAULT_PAGE_DELAY_MS, QUICK_PAGE_BUDGET,
};
pub use listing::{NormalizedListing, RawListing};
pub use matches::{Match, MatchMode, MatchTier};
