//! Concurrent fetch orchestrator.
//!
//! One run reads the source registry once, fans out one unit of work per
//! entry across a bounded worker pool, and joins every unit before the run
//! is reported complete. Units are fully isolated: one unit failing never
//! cancels or blocks a sibling, and only the sink's internal critical
//! section is shared between them.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jobscout_shared::{JobScoutError, KeywordSet, Result, SourceEntry};
use jobscout_storage::CsvSink;
use reqwest::Client;
use tokio::sync::{Mutex, mpsc};
use tracing::{info, instrument, warn};

use crate::adapters::{AdapterSet, SourceAdapter};

/// User-Agent string for all outbound requests.
const USER_AGENT: &str = concat!("jobscout/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// Summary of a completed run. Per-source, never a single pass/fail.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Units that completed their whole pipeline without error.
    pub sources_succeeded: usize,
    /// Units that failed fetch, decode, or sink write.
    pub sources_failed: usize,
    /// Listings that matched the keyword set and were appended to the sink.
    pub listings_matched: usize,
    /// (company, error message) for every failed unit.
    pub failures: Vec<(String, String)>,
    /// Total wall-clock duration of the run.
    pub duration: Duration,
}

/// Typed result one unit reports back through the results channel.
#[derive(Debug)]
struct UnitOutcome {
    company: String,
    matched: usize,
    error: Option<String>,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives one fetch-normalize-filter-persist run over a set of registry
/// entries.
pub struct Orchestrator {
    client: Client,
    adapters: Arc<AdapterSet>,
    keywords: Arc<KeywordSet>,
    concurrency: usize,
}

impl Orchestrator {
    /// Build an orchestrator with its own HTTP client. Connect/read
    /// timeouts live on the client; the orchestrator imposes none of its
    /// own.
    pub fn new(keywords: KeywordSet, concurrency: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| JobScoutError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            adapters: Arc::new(AdapterSet::new()),
            keywords: Arc::new(keywords),
            concurrency: concurrency.max(1),
        })
    }

    /// Swap the adapter set (mock API hosts in tests).
    #[cfg(test)]
    fn with_adapters(mut self, adapters: AdapterSet) -> Self {
        self.adapters = Arc::new(adapters);
        self
    }

    /// Run every registry entry to completion and report the batch outcome.
    ///
    /// Entries are consumed by `min(concurrency, entries)` workers from a
    /// queue; each worker reports one typed outcome per entry, and the run
    /// returns only after every worker has terminated. Failures are
    /// collected, never propagated.
    #[instrument(skip_all, fields(sources = entries.len()))]
    pub async fn run(&self, entries: Vec<SourceEntry>, sink: Arc<CsvSink>) -> RunReport {
        let started = Instant::now();
        let total = entries.len();

        let mut report = RunReport {
            sources_succeeded: 0,
            sources_failed: 0,
            listings_matched: 0,
            failures: Vec::new(),
            duration: Duration::ZERO,
        };

        if total == 0 {
            report.duration = started.elapsed();
            return report;
        }

        let (entry_tx, entry_rx) = mpsc::channel::<SourceEntry>(total);
        let entry_rx = Arc::new(Mutex::new(entry_rx));
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<UnitOutcome>(total);

        for entry in entries {
            // Channel capacity equals the entry count; this never blocks.
            let _ = entry_tx.send(entry).await;
        }
        drop(entry_tx);

        let workers = self.concurrency.min(total);
        info!(workers, sources = total, "dispatching fetch units");

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let client = self.client.clone();
            let adapters = Arc::clone(&self.adapters);
            let keywords = Arc::clone(&self.keywords);
            let sink = Arc::clone(&sink);
            let entry_rx = Arc::clone(&entry_rx);
            let outcome_tx = outcome_tx.clone();

            handles.push(tokio::spawn(async move {
                loop {
                    let entry = { entry_rx.lock().await.recv().await };
                    let Some(entry) = entry else { break };

                    let outcome = run_unit(&client, &adapters, &keywords, &sink, &entry).await;
                    if outcome_tx.send(outcome).await.is_err() {
                        break;
                    }
                }
            }));
        }
        drop(outcome_tx);

        // The outcome channel closes once every worker has drained the
        // queue and hung up; exactly one outcome arrives per entry.
        while let Some(outcome) = outcome_rx.recv().await {
            report.listings_matched += outcome.matched;
            match outcome.error {
                None => report.sources_succeeded += 1,
                Some(error) => {
                    report.sources_failed += 1;
                    report.failures.push((outcome.company, error));
                }
            }
        }

        // Run-level join: the batch is complete only when every unit has
        // terminated.
        for handle in handles {
            let _ = handle.await;
        }

        report.duration = started.elapsed();
        info!(
            succeeded = report.sources_succeeded,
            failed = report.sources_failed,
            matched = report.listings_matched,
            duration_ms = report.duration.as_millis(),
            "run completed"
        );

        report
    }

    /// Drive one LeverCo careers page through the same
    /// fetch-normalize-filter-persist pipeline, outside the registry.
    /// Returns the number of matches appended.
    #[instrument(skip(self, sink))]
    pub async fn run_lever_board(
        &self,
        company: &str,
        careers_url: &str,
        sink: &CsvSink,
    ) -> Result<usize> {
        let listings = self
            .adapters
            .lever()
            .fetch_and_normalize(&self.client, company, careers_url)
            .await?;

        let mut matched = 0;
        for listing in listings.iter().filter(|l| self.keywords.matches(&l.title)) {
            sink.append(listing).await?;
            matched += 1;
        }

        Ok(matched)
    }
}

/// One unit of work: adapter fetch → normalize → filter → sink append.
/// All errors are caught here and folded into the outcome.
async fn run_unit(
    client: &Client,
    adapters: &AdapterSet,
    keywords: &KeywordSet,
    sink: &CsvSink,
    entry: &SourceEntry,
) -> UnitOutcome {
    match adapters.fetch_for(client, entry).await {
        Ok(listings) => {
            let mut matched = 0;
            let mut error = None;

            for listing in listings.iter().filter(|l| keywords.matches(&l.title)) {
                match sink.append(listing).await {
                    Ok(()) => matched += 1,
                    Err(e) => {
                        warn!(company = %entry.company, error = %e, "sink append failed");
                        error = Some(e.to_string());
                    }
                }
            }

            UnitOutcome {
                company: entry.company.clone(),
                matched,
                error,
            }
        }
        Err(e) => {
            warn!(
                company = %entry.company,
                kind = %entry.kind,
                error = %e,
                "source fetch failed"
            );
            UnitOutcome {
                company: entry.company.clone(),
                matched: 0,
                error: Some(e.to_string()),
            }
        }
    }
}
