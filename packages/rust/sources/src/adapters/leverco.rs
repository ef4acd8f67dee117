//! LeverCo careers-page adapter.
//!
//! Lever boards have no public JSON listing endpoint in this design, so the
//! adapter fetches the careers page itself and extracts postings from the
//! `.posting` containers. Extraction is best-effort per field: a missing
//! element inside a container yields an empty string, never a hard failure.

use chrono::Utc;
use jobscout_shared::{JobListing, JobScoutError, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::SourceAdapter;
use crate::normalize;

/// One posting extracted from a Lever careers page. Lifetime is scoped to a
/// single fetch-and-normalize step; never persisted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeverCoJobPosting {
    pub title: String,
    pub location: String,
    pub category: String,
    pub contract_type: String,
    pub commitment: String,
    pub apply_url: String,
}

/// Fetches and scrapes a LeverCo careers page.
pub struct LeverCoAdapter;

impl SourceAdapter for LeverCoAdapter {
    fn name(&self) -> &'static str {
        "leverco"
    }

    async fn fetch_and_normalize(
        &self,
        client: &Client,
        company: &str,
        locator: &str,
    ) -> Result<Vec<JobListing>> {
        let base = Url::parse(locator)
            .map_err(|e| JobScoutError::parse(format!("lever careers URL {locator:?}: {e}")))?;

        let response = client
            .get(base.as_str())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| JobScoutError::Fetch(format!("{locator}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobScoutError::Fetch(format!("{locator}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| JobScoutError::Fetch(format!("{locator}: body read failed: {e}")))?;

        let postings = parse_postings(&body)?;
        debug!(company, total = postings.len(), "scraped lever careers page");

        let observed_at = Utc::now();
        Ok(postings
            .iter()
            .map(|job| normalize::leverco_listing(job, company, &base, observed_at))
            .collect())
    }
}

/// Extract every `.posting` container from a careers-page document.
///
/// Kept synchronous so the non-`Send` parsed document never lives across an
/// await point.
fn parse_postings(html: &str) -> Result<Vec<LeverCoJobPosting>> {
    if !html.contains('<') {
        return Err(JobScoutError::parse(
            "lever response is not an HTML document".to_string(),
        ));
    }

    let doc = Html::parse_document(html);
    let container_sel = Selector::parse(".posting").unwrap();
    let title_sel = Selector::parse(".posting-name").unwrap();
    let apply_sel = Selector::parse(".posting-btn-submit").unwrap();
    let category_sel = Selector::parse(".department").unwrap();
    let location_sel = Selector::parse(".location").unwrap();
    let commitment_sel = Selector::parse(".commitment").unwrap();
    let workplace_sel = Selector::parse(".workplaceTypes").unwrap();

    let postings = doc
        .select(&container_sel)
        .map(|container| LeverCoJobPosting {
            title: text_of(&container, &title_sel),
            location: text_of(&container, &location_sel),
            category: text_of(&container, &category_sel),
            contract_type: text_of(&container, &workplace_sel),
            commitment: text_of(&container, &commitment_sel),
            apply_url: attr_of(&container, &apply_sel, "href"),
        })
        .collect();

    Ok(postings)
}

fn text_of(container: &ElementRef<'_>, selector: &Selector) -> String {
    container
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn attr_of(container: &ElementRef<'_>, selector: &Selector, attr: &str) -> String {
    container
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixture() -> String {
        std::fs::read_to_string("../../../fixtures/html/leverco.html")
            .expect("missing leverco fixture")
    }

    #[test]
    fn extracts_postings_from_fixture() {
        let postings = parse_postings(&fixture()).expect("parse");
        assert_eq!(postings.len(), 3);

        let first = &postings[0];
        assert_eq!(first.title, "Backend Engineering Intern");
        assert_eq!(first.location, "New York, NY");
        assert_eq!(first.category, "Engineering");
        assert_eq!(first.commitment, "Full-time");
        assert_eq!(first.contract_type, "Hybrid");
        assert_eq!(
            first.apply_url,
            "https://jobs.lever.co/initech/11111111/apply"
        );
    }

    #[test]
    fn missing_fields_are_empty_not_fatal() {
        let postings = parse_postings(&fixture()).expect("parse");
        // The third fixture posting has no workplace-type or commitment label.
        let sparse = &postings[2];
        assert_eq!(sparse.title, "Office Coordinator");
        assert!(sparse.contract_type.is_empty());
        assert!(sparse.commitment.is_empty());
    }

    #[test]
    fn non_markup_body_is_parse_error() {
        let err = parse_postings("just some plain text").expect_err("must fail");
        assert!(matches!(err, JobScoutError::Parse { .. }));
    }

    #[test]
    fn page_without_containers_yields_empty_list() {
        let postings = parse_postings("<html><body><p>No jobs.</p></body></html>")
            .expect("parse");
        assert!(postings.is_empty());
    }

    #[tokio::test]
    async fn fetches_and_normalizes_board() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/initech"))
            .respond_with(ResponseTemplate::new(200).set_body_string(fixture()))
            .mount(&server)
            .await;

        let url = format!("{}/initech", server.uri());
        let listings = LeverCoAdapter
            .fetch_and_normalize(&Client::new(), "Initech", &url)
            .await
            .expect("fetch");

        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].company, "Initech");
        // Absolute apply URLs pass through untouched.
        assert_eq!(
            listings[0].link,
            "https://jobs.lever.co/initech/11111111/apply"
        );
        // Relative apply URLs are joined against the careers page.
        assert_eq!(
            listings[2].link,
            format!("{}/initech/33333333/apply", server.uri())
        );
    }

    #[tokio::test]
    async fn transport_failure_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/initech"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = format!("{}/initech", server.uri());
        let err = LeverCoAdapter
            .fetch_and_normalize(&Client::new(), "Initech", &url)
            .await
            .expect_err("must fail");
        assert!(matches!(err, JobScoutError::Fetch(_)));
    }
}
