//! Progress and log sinks.
//!
//! Both are fire-and-forget: the engine never consults a return value.
//! Cancellation is not a trait of its own - the engine polls a
//! `tokio_util::sync::CancellationToken` at loop boundaries.

/// Receives page-level progress during a crawl.
pub trait ProgressSink: Send + Sync {
    /// Report the current 1-based page and the configured maximum.
    /// `page_max` is `None` for an unbounded run.
    fn report(&self, page_number: u32, page_max: Option<u32>);
}

/// Receives the user-visible run log.
///
/// Engine diagnostics additionally go to `tracing`; this sink carries
/// only the narration a front end would show while a search runs.
pub trait LogSink: Send + Sync {
    /// Append one line to the run log.
    fn log(&self, message: &str);
}

/// Progress sink that discards all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _page_number: u32, _page_max: Option<u32>) {}
}

/// Log sink that discards all lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl LogSink for NullLog {
    fn log(&self, _message: &str) {}
}

/// Log sink that forwards the run log to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn log(&self, message: &str) {
        tracing::info!(target: "listing_radar::run", "{}", message);
    }
}
