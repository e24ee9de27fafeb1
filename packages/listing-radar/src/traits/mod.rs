//! Capability traits consumed by the engine.
//!
//! The engine never fetches pages, renders progress, or writes logs
//! itself; callers inject these capabilities so tests can substitute
//! deterministic fakes.

pub mod extractor;
pub mod fetcher;
pub mod hooks;

pub use extractor::{ExtractedItem, ItemExtractor};
pub use fetcher::{FetchedPage, PageFetcher};
pub use hooks::{LogSink, NullLog, NullProgress, ProgressSink, TracingLog};
