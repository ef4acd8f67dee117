//! GreenHouse boards-api adapter.
//!
//! One unauthenticated `GET {api_base}/v1/boards/{slug}/jobs` per call,
//! decoded straight from the documented JSON shape.

use chrono::Utc;
use jobscout_shared::{JobListing, JobScoutError, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::SourceAdapter;
use crate::normalize;

/// Production boards-api host.
const DEFAULT_API_BASE: &str = "https://boards-api.greenhouse.io";

// ---------------------------------------------------------------------------
// Wire models
// ---------------------------------------------------------------------------

/// `GET /v1/boards/{slug}/jobs` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GreenHouseResponse {
    pub jobs: Vec<GreenHouseJob>,
    pub meta: GreenHouseMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GreenHouseMeta {
    pub total: i64,
}

/// One posting as the boards-api serves it. Lifetime is scoped to a single
/// fetch-and-normalize step; never persisted as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct GreenHouseJob {
    pub title: String,
    pub absolute_url: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub requisition_id: Option<String>,
    #[serde(default)]
    pub internal_job_id: i64,
    #[serde(default)]
    pub location: GreenHouseLocation,
    #[serde(default)]
    pub data_compliance: Vec<GreenHouseDataCompliance>,
    /// Board-specific custom fields; shape varies per tenant.
    #[serde(default)]
    pub metadata: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GreenHouseLocation {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GreenHouseDataCompliance {
    #[serde(rename = "type", default)]
    pub compliance_type: String,
    #[serde(default)]
    pub requires_consent: bool,
    #[serde(default)]
    pub requires_processing_consent: bool,
    #[serde(default)]
    pub requires_retention_consent: bool,
    #[serde(default)]
    pub retention_period: Option<i64>,
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Fetches a GreenHouse board by slug.
pub struct GreenHouseAdapter {
    api_base: String,
}

impl GreenHouseAdapter {
    pub fn new() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
        }
    }

    /// Point the adapter at a different API host (mock servers in tests).
    #[cfg(test)]
    pub(crate) fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

impl Default for GreenHouseAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAdapter for GreenHouseAdapter {
    fn name(&self) -> &'static str {
        "greenhouse"
    }

    async fn fetch_and_normalize(
        &self,
        client: &Client,
        company: &str,
        locator: &str,
    ) -> Result<Vec<JobListing>> {
        let url = format!("{}/v1/boards/{}/jobs", self.api_base, locator);

        let response = client
            .get(&url)
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

        let decoded: GreenHouseResponse = serde_json::from_str(&body)
            .map_err(|e| JobScoutError::decode(format!("{url}: {e}")))?;

        debug!(company, slug = locator, total = decoded.meta.total, "fetched greenhouse board");

        let observed_at = Utc::now();
        Ok(decoded
            .jobs
            .iter()
            .map(|job| normalize::greenhouse_listing(job, company, observed_at))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixture() -> String {
        std::fs::read_to_string("../../../fixtures/json/greenhouse.fixture.json")
            .expect("missing greenhouse fixture")
    }

    #[test]
    fn decodes_fixture_shape() {
        let decoded: GreenHouseResponse =
            serde_json::from_str(&fixture()).expect("decode fixture");
        assert_eq!(decoded.meta.total, 3);
        assert_eq!(decoded.jobs.len(), 3);

        let first = &decoded.jobs[0];
        assert_eq!(first.title, "Software Engineering Intern");
        assert_eq!(first.requisition_id.as_deref(), Some("REQ-1001"));
        assert_eq!(first.location.name, "New York, NY");
        assert!(!first.data_compliance.is_empty());

        // Second job has a null requisition id on the wire.
        assert!(decoded.jobs[1].requisition_id.is_none());
    }

    #[tokio::test]
    async fn fetches_and_normalizes_board() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/boards/acme/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_string(fixture()))
            .mount(&server)
            .await;

        let adapter = GreenHouseAdapter::with_api_base(server.uri());
        let client = Client::new();
        let listings = adapter
            .fetch_and_normalize(&client, "Acme", "acme")
            .await
            .expect("fetch");

        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].id, "REQ-1001");
        assert_eq!(listings[0].company, "Acme");
        assert_eq!(listings[0].date_posted, "2024-05-01T09:30:00-04:00");
        assert!(listings[0].link.starts_with("https://"));
        // Null requisition id falls back to the internal job id.
        assert_eq!(listings[1].id, "4000002");
    }

    #[tokio::test]
    async fn non_2xx_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/boards/acme/jobs"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let adapter = GreenHouseAdapter::with_api_base(server.uri());
        let err = adapter
            .fetch_and_normalize(&Client::new(), "Acme", "acme")
            .await
            .expect_err("must fail");
        assert!(matches!(err, JobScoutError::Fetch(_)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/boards/acme/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let adapter = GreenHouseAdapter::with_api_base(server.uri());
        let err = adapter
            .fetch_and_normalize(&Client::new(), "Acme", "acme")
            .await
            .expect_err("must fail");
        assert!(matches!(err, JobScoutError::Decode { .. }));
    }
}
