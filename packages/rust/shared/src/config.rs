//! Application configuration for jobscout.
//!
//! The config is a JSON document read once at process start. Absence or
//! malformed content is a fatal startup error, never a per-run recoverable
//! one.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{JobScoutError, Result};

/// Top-level application config, deserialized from `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the source registry CSV (one row per company/source).
    pub company_list_csv_path: String,

    /// Path to the sink CSV that matched listings are appended to.
    pub job_list_csv_path: String,

    /// Keywords a title must contain (whole-token) to be persisted.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            company_list_csv_path: "JobLinks.csv".into(),
            job_list_csv_path: "JobList.csv".into(),
            keywords: vec!["intern".into(), "internship".into()],
        }
    }
}

/// Load the application config from a specific file path.
///
/// A missing file is an error here — the pipeline never runs with implicit
/// defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        JobScoutError::config(format!("could not read {}: {e}", path.display()))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        JobScoutError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file at `path`. Refuses to overwrite.
pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(JobScoutError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = serde_json::to_string_pretty(&AppConfig::default())
        .map_err(|e| JobScoutError::config(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| JobScoutError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.company_list_csv_path, "JobLinks.csv");
        assert_eq!(parsed.keywords.len(), 2);
    }

    #[test]
    fn config_parses_documented_schema() {
        let json = r#"{
            "company_list_csv_path": "/data/JobLinks.csv",
            "job_list_csv_path": "/data/JobList.csv",
            "keywords": ["intern", "co-op"]
        }"#;
        let config: AppConfig = serde_json::from_str(json).expect("parse");
        assert_eq!(config.company_list_csv_path, "/data/JobLinks.csv");
        assert_eq!(config.keywords, vec!["intern", "co-op"]);
    }

    #[test]
    fn keywords_default_to_empty_when_absent() {
        let json = r#"{
            "company_list_csv_path": "a.csv",
            "job_list_csv_path": "b.csv"
        }"#;
        let config: AppConfig = serde_json::from_str(json).expect("parse");
        assert!(config.keywords.is_empty());
    }

    #[test]
    fn missing_file_is_fatal_config_error() {
        let err = load_config_from(Path::new("/nonexistent/jobscout-config.json"))
            .expect_err("must fail");
        assert!(matches!(err, JobScoutError::Config { .. }));
    }
}
