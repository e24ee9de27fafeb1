//! Typed errors for the listing engine.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Transport-level failures are never fatal to a run: the crawl loop
//! absorbs them as empty pages and surfaces them only through logs.

use thiserror::Error;

/// Errors that can occur while fetching a listing page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Response looked like a blocked or empty shell page
    #[error("blocked response for: {url}")]
    Blocked { url: String },

    /// Every strategy in a fallback chain failed
    #[error("all fetch strategies exhausted for: {url}")]
    Exhausted { url: String },
}

/// Errors surfaced to the engine's caller.
///
/// Only caller misuse lands here; nothing a source does mid-run is fatal.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A run was started with no enabled sources
    #[error("no sources enabled for this run")]
    NoSourcesEnabled,

    /// A run was started with an empty address book
    #[error("address book is empty")]
    NoAddresses,
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
