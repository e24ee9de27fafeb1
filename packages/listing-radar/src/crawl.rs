//! Pagination loop over one source.
//!
//! Walks a source's categories page by page until the page budget or
//! the empty-page policy ends the category, collecting candidate ads
//! into raw listings. Transport failures are absorbed as empty pages;
//! nothing a site does mid-crawl fails the run.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::classify::RentalClassifier;
use crate::sources::Source;
use crate::traits::{LogSink, PageFetcher, ProgressSink};
use crate::types::{CrawlPolicy, NormalizedListing, RawListing};

/// What ended a source crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlEnd {
    /// Every category ran to its budget or exhaustion
    Done,
    /// The cancellation token fired mid-crawl
    Cancelled,
}

/// Result of crawling one source across all its categories.
///
/// Listings come out already normalized; callers can hand them straight
/// to the matcher.
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Accepted listings, in discovery order, deduped by detail URL
    pub listings: Vec<NormalizedListing>,

    /// Pages actually fetched (attempts count, empty pages included)
    pub pages_fetched: u32,

    /// Why the crawl ended
    pub end: CrawlEnd,
}

/// Per-category loop bookkeeping.
///
/// Tracks the 1-based page cursor and the consecutive-empty-page run
/// that decides when a category is exhausted.
#[derive(Debug)]
struct CrawlState {
    page_number: u32,
    consecutive_empty_pages: u32,
}

impl CrawlState {
    fn new() -> Self {
        Self {
            page_number: 1,
            consecutive_empty_pages: 0,
        }
    }

    fn record_page(&mut self, empty: bool) {
        if empty {
            self.consecutive_empty_pages += 1;
        } else {
            self.consecutive_empty_pages = 0;
        }
        self.page_number += 1;
    }

    fn exhausted(&self, policy: &CrawlPolicy) -> bool {
        self.consecutive_empty_pages >= policy.empty_page_threshold
    }

    fn over_budget(&self, budget: Option<u32>) -> bool {
        match budget {
            Some(max) => self.page_number > max,
            None => false,
        }
    }
}

/// Tighter of the run policy's budget and the source's own page cap.
fn page_budget(policy: &CrawlPolicy, source_limit: Option<u32>) -> Option<u32> {
    match (policy.max_pages, source_limit) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (budget, None) => budget,
        (None, limit) => limit,
    }
}

/// Crawl one source's categories sequentially.
///
/// Cancellation is polled at page boundaries only; a page in flight
/// finishes and its listings are kept.
pub async fn crawl_source(
    source: &Source,
    fetcher: &dyn PageFetcher,
    classifier: &RentalClassifier,
    policy: &CrawlPolicy,
    progress: &dyn ProgressSink,
    log: &dyn LogSink,
    cancel: &CancellationToken,
) -> CrawlOutcome {
    let config = source.config();
    let extractor = source.extractor();

    let mut listings: Vec<NormalizedListing> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut pages_fetched: u32 = 0;
    let budget = page_budget(policy, config.page_limit);

    info!(source = %config.id, categories = config.categories.len(), "source crawl starting");

    for category in &config.categories {
        log.log(&format!("{}: {} ...", config.name, category.name));
        let mut state = CrawlState::new();

        loop {
            if cancel.is_cancelled() {
                info!(source = %config.id, "crawl cancelled");
                return CrawlOutcome {
                    listings,
                    pages_fetched,
                    end: CrawlEnd::Cancelled,
                };
            }
            if state.over_budget(budget) {
                debug!(source = %config.id, category = %category.name, "page budget reached");
                break;
            }

            progress.report(state.page_number, budget);

            let url = extractor.page_url(&config.base_url, &category.path, state.page_number);
            pages_fetched += 1;

            let accepted = match fetcher.fetch(&url).await {
                Ok(page) if page.status_ok && page.html.len() >= policy.min_page_bytes => {
                    collect_items(
                        &page.html,
                        source,
                        classifier,
                        &mut seen_urls,
                        &mut listings,
                    )
                }
                Ok(page) => {
                    debug!(
                        url = %url,
                        status_ok = page.status_ok,
                        content_length = page.html.len(),
                        "page unusable, counting as empty"
                    );
                    0
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "page fetch failed, counting as empty");
                    0
                }
            };

            debug!(
                source = %config.id,
                page = state.page_number,
                accepted,
                total = listings.len(),
                "page processed"
            );

            state.record_page(accepted == 0);
            if state.exhausted(policy) {
                log.log(&format!(
                    "{}: {} exhausted after page {}",
                    config.name, category.name, state.page_number - 1
                ));
                break;
            }

            page_delay(policy).await;
        }
    }

    info!(
        source = %config.id,
        listings = listings.len(),
        pages_fetched,
        "source crawl finished"
    );

    CrawlOutcome {
        listings,
        pages_fetched,
        end: CrawlEnd::Done,
    }
}

/// Extract, filter, and dedupe one page's items. Returns how many
/// listings the page contributed.
fn collect_items(
    html: &str,
    source: &Source,
    classifier: &RentalClassifier,
    seen_urls: &mut HashSet<String>,
    listings: &mut Vec<NormalizedListing>,
) -> usize {
    let config = source.config();
    let extractor = source.extractor();
    let mut accepted = 0;

    for item in extractor.extract(html) {
        if !extractor.accepts_detail_url(&item.detail_url) {
            continue;
        }
        if config.requires_rental_filter && !classifier.is_rental_listing(&item.raw_text) {
            debug!(url = %item.detail_url, "item rejected by rental filter");
            continue;
        }
        if !seen_urls.insert(item.detail_url.clone()) {
            continue;
        }
        listings.push(
            RawListing::new(&config.id, &config.name, item.detail_url, item.raw_text)
                .into_normalized(),
        );
        accepted += 1;
    }

    accepted
}

/// Sleep a jittered interval between page fetches. `(0, 0)` disables
/// the delay.
async fn page_delay(policy: &CrawlPolicy) {
    let (min, max) = policy.page_delay_ms;
    if max == 0 {
        return;
    }
    let ms = if min >= max { min } else { fastrand::u64(min..=max) };
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
