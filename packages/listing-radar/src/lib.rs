//! Rental Listing Crawl-and-Match Engine
//!
//! Crawls German classifieds sites for rental ads and matches them
//! against a book of watched addresses. Built for "did anything show up
//! at one of my streets today" searches rather than general browsing.
//!
//! # Design Philosophy
//!
//! - Sources are data plus selector logic, not subclasses
//! - Transport failures degrade to empty pages, never fail a run
//! - Matching is a pure pass over the aggregated listing set
//! - Cancellation is cooperative and a stopped run still reports
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use listing_radar::{Address, Engine, HttpFetcher, MatchMode, Source};
//!
//! let engine = Engine::new(Arc::new(HttpFetcher::new()));
//! let sources = vec![
//!     Source::kleinanzeigen("München"),
//!     Source::wg_gesucht("München").expect("supported city"),
//! ];
//! let addresses = vec![Address::new(1, "Hauptstraße", "5", "80331", "München")];
//!
//! let report = engine.run(&sources, &addresses, MatchMode::Extended).await?;
//! for m in &report.matches {
//!     println!("{} -> {}", m.address_display, m.listing_url);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (PageFetcher, ItemExtractor, sinks)
//! - [`types`] - Addresses, listings, matches, and crawl configuration
//! - [`sources`] - Built-in source catalog (Kleinanzeigen, WG-Gesucht,
//!   ImmoScout24, Immowelt)
//! - [`fetchers`] - Fetcher implementations (HTTP, fallback chain, rate limiting)
//! - [`crawl`] - The per-source pagination loop
//! - [`aggregate`] - Run orchestration and reporting
//! - [`testing`] - Mock implementations for testing

pub mod aggregate;
pub mod classify;
pub mod crawl;
pub mod error;
pub mod fetchers;
pub mod matcher;
pub mod normalize;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{EngineError, EngineResult, FetchError, FetchResult};
pub use traits::{
    ExtractedItem, FetchedPage, ItemExtractor, LogSink, NullLog, NullProgress, PageFetcher,
    ProgressSink, TracingLog,
};
pub use types::{
    Address, Category, CrawlPolicy, Match, MatchMode, MatchTier, NormalizedListing, RawListing,
    RunMode, SourceConfig,
};

pub use aggregate::{Engine, RunReport, RunStatus};
pub use classify::RentalClassifier;
pub use crawl::{crawl_source, CrawlEnd, CrawlOutcome};
pub use fetchers::{FallbackFetcher, FetcherExt, HttpFetcher, RateLimitedFetcher};
pub use matcher::{house_variants, match_listings, street_variants};
pub use normalize::normalize;
pub use sources::Source;

// Re-export testing utilities
pub use testing::{MockFetcher, RecordingLog, RecordingProgress};
