//! Core domain types for the jobscout pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SourceKind
// ---------------------------------------------------------------------------

/// Which registry-driven job-board backend a [`SourceEntry`] targets.
///
/// LeverCo boards are reachable only by direct invocation (the engine's
/// `run_lever_board`), never through the registry kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    GreenHouse,
    WorkDay,
}

impl SourceKind {
    /// Map the registry's numeric tag onto a kind: `1` is GreenHouse, any
    /// other value is WorkDay.
    pub fn from_registry_tag(tag: i64) -> Self {
        if tag == 1 {
            Self::GreenHouse
        } else {
            Self::WorkDay
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GreenHouse => write!(f, "greenhouse"),
            Self::WorkDay => write!(f, "workday"),
        }
    }
}

// ---------------------------------------------------------------------------
// SourceEntry
// ---------------------------------------------------------------------------

/// One row of the source registry: a company, the backend kind, and a
/// source-specific locator (board slug for GreenHouse, career-page URL for
/// WorkDay). Immutable once read; one entry produces zero or more listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Company name, carried verbatim into every listing it produces.
    pub company: String,
    /// Which adapter handles this entry.
    pub kind: SourceKind,
    /// Board slug or base career-page URL, per `kind`.
    pub locator: String,
}

// ---------------------------------------------------------------------------
// JobListing
// ---------------------------------------------------------------------------

/// The canonical record every source is normalized into.
///
/// Invariant: `link` is always an absolute URL — relative paths from WorkDay
/// and LeverCo are joined against the source's base before normalization
/// completes. Immutable after creation; its lifecycle ends when it is
/// appended to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    /// Source-specific identifier. GreenHouse uses the requisition id;
    /// WorkDay and LeverCo have no native id and get a deterministic hash
    /// of `(company, path)` so reruns can later be deduplicated.
    pub id: String,
    pub title: String,
    pub company: String,
    /// Source-native date representation, never reparsed.
    pub date_posted: String,
    /// Absolute URL to the posting.
    pub link: String,
    /// RFC 3339 instant at which this pipeline observed the listing.
    pub date_uploaded: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_tag_mapping() {
        assert_eq!(SourceKind::from_registry_tag(1), SourceKind::GreenHouse);
        assert_eq!(SourceKind::from_registry_tag(2), SourceKind::WorkDay);
        assert_eq!(SourceKind::from_registry_tag(0), SourceKind::WorkDay);
        assert_eq!(SourceKind::from_registry_tag(-7), SourceKind::WorkDay);
    }

    #[test]
    fn listing_serialization_roundtrip() {
        let listing = JobListing {
            id: "REQ-1".into(),
            title: "Software Intern".into(),
            company: "Acme".into(),
            date_posted: "2024-01-01".into(),
            link: "https://boards.example.com/acme/1".into(),
            date_uploaded: "2024-02-02T00:00:00Z".into(),
        };

        let json = serde_json::to_string(&listing).expect("serialize");
        let parsed: JobListing = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, listing);
    }
}
