//! Source adapter trait and built-in adapters for the three supported
//! career-site backends.
//!
//! Each adapter independently fetches raw bytes from its source, decodes
//! them into that backend's native record shape, and hands back canonical
//! [`JobListing`] records. Filtering and persistence are composed around
//! the adapters by the engine, never embedded in them.

pub mod greenhouse;
pub mod leverco;
pub mod workday;

use jobscout_shared::{JobListing, Result, SourceEntry, SourceKind};
use reqwest::Client;

pub use greenhouse::{GreenHouseAdapter, GreenHouseJob, GreenHouseResponse};
pub use leverco::{LeverCoAdapter, LeverCoJobPosting};
pub use workday::{WorkDayAdapter, WorkDayJobPosting, WorkDayResponse, derive_api_link};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// One source backend: fetch a single response page, decode it, and
/// normalize every posting in it.
///
/// A single best-effort attempt per call — no retries; a failure aborts
/// only the unit that invoked the adapter.
#[allow(async_fn_in_trait)]
pub trait SourceAdapter {
    /// Human-readable adapter name for tracing.
    fn name(&self) -> &'static str;

    /// Fetch the source behind `locator` and return its postings as
    /// canonical listings attributed to `company`.
    async fn fetch_and_normalize(
        &self,
        client: &Client,
        company: &str,
        locator: &str,
    ) -> Result<Vec<JobListing>>;
}

// ---------------------------------------------------------------------------
// AdapterSet
// ---------------------------------------------------------------------------

/// Holds one instance of every built-in adapter and routes registry entries
/// to the right one by kind.
pub struct AdapterSet {
    greenhouse: GreenHouseAdapter,
    workday: WorkDayAdapter,
    lever: LeverCoAdapter,
}

impl AdapterSet {
    pub fn new() -> Self {
        Self {
            greenhouse: GreenHouseAdapter::new(),
            workday: WorkDayAdapter,
            lever: LeverCoAdapter,
        }
    }

    /// Swap in a GreenHouse adapter pointed at a mock API host.
    #[cfg(test)]
    pub(crate) fn with_greenhouse(mut self, adapter: GreenHouseAdapter) -> Self {
        self.greenhouse = adapter;
        self
    }

    /// Run the adapter matching `entry.kind` against the entry's locator.
    pub async fn fetch_for(&self, client: &Client, entry: &SourceEntry) -> Result<Vec<JobListing>> {
        match entry.kind {
            SourceKind::GreenHouse => {
                self.greenhouse
                    .fetch_and_normalize(client, &entry.company, &entry.locator)
                    .await
            }
            SourceKind::WorkDay => {
                self.workday
                    .fetch_and_normalize(client, &entry.company, &entry.locator)
                    .await
            }
        }
    }

    /// The LeverCo adapter, reachable only by direct invocation.
    pub fn lever(&self) -> &LeverCoAdapter {
        &self.lever
    }
}

impl Default for AdapterSet {
    fn default() -> Self {
        Self::new()
    }
}
