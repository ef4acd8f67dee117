//! Maps each adapter's native record into the canonical [`JobListing`].
//!
//! Pure functions: no I/O, no clocks — the observation instant is passed in
//! by the caller so normalization stays deterministic under test.

use chrono::{DateTime, Utc};
use jobscout_shared::JobListing;
use sha2::{Digest, Sha256};
use url::Url;

use crate::adapters::LeverCoJobPosting;
use crate::adapters::greenhouse::GreenHouseJob;
use crate::adapters::workday::WorkDayJobPosting;

/// Length of synthesized listing ids (hex chars of the SHA-256 prefix).
const SYNTH_ID_LEN: usize = 16;

/// GreenHouse: the requisition id is the native identifier; a missing or
/// blank one falls back to the stringified internal job id.
pub(crate) fn greenhouse_listing(
    job: &GreenHouseJob,
    company: &str,
    observed_at: DateTime<Utc>,
) -> JobListing {
    let id = match job.requisition_id.as_deref() {
        Some(req) if !req.trim().is_empty() => req.to_string(),
        _ => job.internal_job_id.to_string(),
    };

    JobListing {
        id,
        title: job.title.clone(),
        company: company.to_string(),
        date_posted: job.updated_at.clone(),
        link: job.absolute_url.clone(),
        date_uploaded: observed_at.to_rfc3339(),
    }
}

/// WorkDay: no native id on the wire, so one is synthesized from
/// `(company, external_path)`; the site-relative external path is joined
/// onto the tenant host to keep the link absolute.
pub(crate) fn workday_listing(
    job: &WorkDayJobPosting,
    company: &str,
    job_base: &str,
    observed_at: DateTime<Utc>,
) -> JobListing {
    let link = if job.external_path.starts_with("http") {
        job.external_path.clone()
    } else {
        format!("{job_base}{}", job.external_path)
    };

    JobListing {
        id: synth_id(company, &job.external_path),
        title: job.title.clone(),
        company: company.to_string(),
        date_posted: job.posted_on.clone(),
        link,
        date_uploaded: observed_at.to_rfc3339(),
    }
}

/// LeverCo: analogous to WorkDay — synthesized id, and the apply URL is
/// taken verbatim when absolute or joined against the careers page when
/// relative. Lever postings carry no posting date on the page.
pub(crate) fn leverco_listing(
    job: &LeverCoJobPosting,
    company: &str,
    base: &Url,
    observed_at: DateTime<Utc>,
) -> JobListing {
    let link = if job.apply_url.starts_with("http") {
        job.apply_url.clone()
    } else {
        base.join(&job.apply_url)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| job.apply_url.clone())
    };

    JobListing {
        id: synth_id(company, &job.apply_url),
        title: job.title.clone(),
        company: company.to_string(),
        date_posted: String::new(),
        link,
        date_uploaded: observed_at.to_rfc3339(),
    }
}

/// Deterministic placeholder id for sources without a native one: SHA-256
/// of `company:path`, truncated. Stable across runs so a future collaborator
/// can deduplicate reruns.
fn synth_id(company: &str, path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(company.as_bytes());
    hasher.update(b":");
    hasher.update(path.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..SYNTH_ID_LEN].to_string()
}
