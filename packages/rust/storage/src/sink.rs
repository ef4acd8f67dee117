//! Append-only CSV sink for normalized listings.
//!
//! Each append opens the file, writes exactly one row, flushes, and releases
//! the handle — no cross-call buffering. A single internal critical section
//! serializes physical appends so concurrent units never interleave partial
//! rows.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use jobscout_shared::{JobListing, JobScoutError, Result};
use tokio::sync::Mutex;
use tracing::debug;

/// Mutex-guarded CSV file that listings are appended to, one row per call.
///
/// Row shape: `[id, title, company, date_posted, link, date_uploaded]`.
pub struct CsvSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvSink {
    /// Create a sink for `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one listing. The write is atomic with respect to
    /// sibling callers: the row is fully written and flushed before the
    /// lock is released.
    pub async fn append(&self, listing: &JobListing) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| JobScoutError::io(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer
            .write_record([
                &listing.id,
                &listing.title,
                &listing.company,
                &listing.date_posted,
                &listing.link,
                &listing.date_uploaded,
            ])
            .map_err(|e| JobScoutError::io(&self.path, std::io::Error::other(e)))?;
        writer
            .flush()
            .map_err(|e| JobScoutError::io(&self.path, e))?;

        debug!(id = %listing.id, company = %listing.company, "appended listing to sink");
        Ok(())
    }
}
