//! Run orchestration: crawl every source, then match.
//!
//! Sources run one after another over a shared fetcher; the match pass
//! runs exactly once over the aggregated listing set. A cancelled run
//! still matches whatever was collected before the token fired, so a
//! stopped search produces a usable partial report.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::classify::RentalClassifier;
use crate::crawl::{crawl_source, CrawlEnd, CrawlOutcome};
use crate::error::{EngineError, EngineResult};
use crate::matcher::match_listings;
use crate::sources::Source;
use crate::traits::{LogSink, NullLog, NullProgress, PageFetcher, ProgressSink};
use crate::types::{Address, CrawlPolicy, Match, MatchMode, NormalizedListing};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every source ran to completion
    Completed,
    /// The run was cancelled; the report covers what was collected
    Stopped,
}

/// Everything one run produced.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Unique id of this run
    pub run_id: Uuid,

    /// Whether the run completed or was stopped
    pub status: RunStatus,

    /// All collected listings, in source order
    pub listings: Vec<NormalizedListing>,

    /// Address matches over the full listing set
    pub matches: Vec<Match>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// Total pages fetched across all sources
    pub pages_fetched: u32,
}

/// The crawl-and-match engine.
///
/// Construct with a fetcher, then chain `with_*` overrides. One engine
/// value can drive many runs; each run gets a fresh report.
pub struct Engine {
    fetcher: Arc<dyn PageFetcher>,
    progress: Arc<dyn ProgressSink>,
    log: Arc<dyn LogSink>,
    cancel: CancellationToken,
    policy: CrawlPolicy,
    classifier: RentalClassifier,
}

impl Engine {
    /// Create an engine over a fetcher, with quick-run defaults and
    /// no-op sinks.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            progress: Arc::new(NullProgress),
            log: Arc::new(NullLog),
            cancel: CancellationToken::new(),
            policy: CrawlPolicy::quick(),
            classifier: RentalClassifier::new(),
        }
    }

    /// Set the crawl policy.
    pub fn with_policy(mut self, policy: CrawlPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the progress sink.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Set the run-log sink.
    pub fn with_log(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }

    /// Set the cancellation token the run polls at page boundaries.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Set the rental classifier.
    pub fn with_classifier(mut self, classifier: RentalClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// A clone of the engine's cancellation token, for handing to a
    /// stop button or signal handler.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Crawl one source with the engine's fetcher and policy.
    pub async fn collect(&self, source: &Source) -> CrawlOutcome {
        crawl_source(
            source,
            self.fetcher.as_ref(),
            &self.classifier,
            &self.policy,
            self.progress.as_ref(),
            self.log.as_ref(),
            &self.cancel,
        )
        .await
    }

    /// Run a full crawl-and-match pass.
    ///
    /// Sources run sequentially; the shared fetcher keeps one site's
    /// pace independent of how many sources are enabled. Matching runs
    /// even when the crawl was cancelled.
    pub async fn run(
        &self,
        sources: &[Source],
        addresses: &[Address],
        mode: MatchMode,
    ) -> EngineResult<RunReport> {
        if sources.is_empty() {
            return Err(EngineError::NoSourcesEnabled);
        }
        if addresses.is_empty() {
            return Err(EngineError::NoAddresses);
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, sources = sources.len(), addresses = addresses.len(), "run starting");
        self.log.log(&format!(
            "Suche gestartet: {} Quellen, {} Adressen",
            sources.len(),
            addresses.len()
        ));

        let mut listings: Vec<NormalizedListing> = Vec::new();
        let mut pages_fetched: u32 = 0;
        let mut status = RunStatus::Completed;

        for source in sources {
            let outcome = self.collect(source).await;
            pages_fetched += outcome.pages_fetched;
            listings.extend(outcome.listings);

            if outcome.end == CrawlEnd::Cancelled {
                status = RunStatus::Stopped;
                self.log.log("Suche abgebrochen");
                break;
            }
        }

        let matches = match_listings(&listings, addresses, mode);
        let finished_at = Utc::now();

        info!(
            %run_id,
            status = ?status,
            listings = listings.len(),
            matches = matches.len(),
            pages_fetched,
            "run finished"
        );
        self.log.log(&format!(
            "Fertig: {} Anzeigen, {} Treffer",
            listings.len(),
            matches.len()
        ));

        Ok(RunReport {
            run_id,
            status,
            listings,
            matches,
            started_at,
            finished_at,
            pages_fetched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    fn engine(fetcher: MockFetcher) -> Engine {
        Engine::new(Arc::new(fetcher))
            .with_policy(CrawlPolicy::quick().with_min_page_bytes(10).without_delay())
    }

    #[tokio::test]
    async fn test_collect_returns_normalized_listings() {
        let ka = Source::kleinanzeigen("München");
        let config = ka.config();
        let page1 = ka
            .extractor()
            .page_url(&config.base_url, &config.categories[0].path, 1);
        let html = format!(
            r#"<html><body><article class="aditem"><a href="/s-anzeige/wohnung/1">ad</a><p>Schöne Wohnung, Hauptstr. 5, 900€ Miete</p></article>{}</body></html>"#,
            " ".repeat(200)
        );

        let e = engine(MockFetcher::new().with_page(page1, html));
        let outcome = e.collect(&ka).await;

        assert_eq!(outcome.listings.len(), 1);
        assert!(outcome.listings[0]
            .normalized_text
            .contains("hauptstrasse 5"));
    }

    #[tokio::test]
    async fn test_run_rejects_empty_inputs() {
        let e = engine(MockFetcher::new());
        let address = Address::new(1, "Hauptstrasse", "5", "80331", "München");

        let err = e.run(&[], &[address], MatchMode::Extended).await.unwrap_err();
        assert!(matches!(err, EngineError::NoSourcesEnabled));

        let err = e
            .run(&[Source::kleinanzeigen("München")], &[], MatchMode::Extended)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NoAddresses));
    }

    #[tokio::test]
    async fn test_cancelled_run_still_reports() {
        let e = engine(MockFetcher::new());
        e.cancellation_token().cancel();

        let address = Address::new(1, "Hauptstrasse", "5", "80331", "München");
        let report = e
            .run(&[Source::kleinanzeigen("München")], &[address], MatchMode::Extended)
            .await
            .unwrap();

        assert_eq!(report.status, RunStatus::Stopped);
        assert!(report.listings.is_empty());
        assert!(report.matches.is_empty());
        assert!(report.finished_at >= report.started_at);
    }
}
