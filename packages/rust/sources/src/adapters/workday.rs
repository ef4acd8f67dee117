//! WorkDay cxs adapter.
//!
//! A WorkDay career page like `https://acme.wd5.myworkdayjobs.com/Careers`
//! fronts a JSON API at `https://{host}/wday/cxs/{company}/{page}/jobs`,
//! where `company` is the subdomain segment before the first `.` and
//! `page` is everything after the first `/`. The postings endpoint answers
//! to an empty-bodied JSON-accepting POST.

use chrono::Utc;
use jobscout_shared::{JobListing, JobScoutError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::SourceAdapter;
use crate::normalize;

// ---------------------------------------------------------------------------
// Wire models
// ---------------------------------------------------------------------------

/// `POST /wday/cxs/{company}/{page}/jobs` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkDayResponse {
    #[serde(default)]
    pub total: i64,
    #[serde(default, rename = "jobPostings")]
    pub job_postings: Vec<WorkDayJobPosting>,
}

/// One posting as the cxs endpoint serves it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDayJobPosting {
    #[serde(default)]
    pub title: String,
    /// Site-relative path to the posting, e.g. `/job/New-York/Intern_R123`.
    #[serde(default)]
    pub external_path: String,
    #[serde(default)]
    pub locations_text: String,
    /// Human-readable relative date, e.g. "Posted 3 Days Ago".
    #[serde(default)]
    pub posted_on: String,
}

// ---------------------------------------------------------------------------
// Locator derivation
// ---------------------------------------------------------------------------

/// A career-page locator split into the pieces the cxs API needs.
struct Locator<'a> {
    scheme: &'a str,
    host: &'a str,
    page: &'a str,
}

/// Split `locator` into scheme, host, and page. The scheme defaults to
/// `https` when absent; an explicit `http://` is preserved. A leading
/// `www.` is stripped from the host.
fn split_locator(locator: &str) -> Result<Locator<'_>> {
    let (scheme, rest) = if let Some(rest) = locator.strip_prefix("https://") {
        ("https", rest)
    } else if let Some(rest) = locator.strip_prefix("http://") {
        ("http", rest)
    } else {
        ("https", locator)
    };
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    let (host, page) = rest.split_once('/').ok_or_else(|| {
        JobScoutError::parse(format!(
            "workday locator {locator:?} has no page segment after the host"
        ))
    })?;
    let page = page.trim_end_matches('/');

    if host.is_empty() || page.is_empty() {
        return Err(JobScoutError::parse(format!(
            "workday locator {locator:?} is missing a host or page"
        )));
    }

    Ok(Locator { scheme, host, page })
}

/// Derive the cxs jobs endpoint for a career-page locator.
pub fn derive_api_link(locator: &str) -> Result<String> {
    let parts = split_locator(locator)?;
    let company = parts.host.split('.').next().unwrap_or(parts.host);
    Ok(format!(
        "{}://{}/wday/cxs/{}/{}/jobs",
        parts.scheme, parts.host, company, parts.page
    ))
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Fetches a WorkDay tenant's postings through its derived cxs endpoint.
pub struct WorkDayAdapter;

impl SourceAdapter for WorkDayAdapter {
    fn name(&self) -> &'static str {
        "workday"
    }

    async fn fetch_and_normalize(
        &self,
        client: &Client,
        company: &str,
        locator: &str,
    ) -> Result<Vec<JobListing>> {
        let url = derive_api_link(locator)?;
        let parts = split_locator(locator)?;
        let job_base = format!("{}://{}", parts.scheme, parts.host);

        let response = client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| JobScoutError::Fetch(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobScoutError::Fetch(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| JobScoutError::Fetch(format!("{url}: body read failed: {e}")))?;

        let decoded: WorkDayResponse = serde_json::from_str(&body)
            .map_err(|e| JobScoutError::decode(format!("{url}: {e}")))?;

        debug!(company, total = decoded.total, "fetched workday postings");

        let observed_at = Utc::now();
        Ok(decoded
            .job_postings
            .iter()
            .map(|job| normalize::workday_listing(job, company, &job_base, observed_at))
            .collect())
    }
}
