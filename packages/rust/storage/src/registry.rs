//! Source registry reader.
//!
//! The registry is a CSV with one header row and rows of
//! `[ordinal, company, kind, locator]`. The kind tag is `1` for GreenHouse
//! and anything else for WorkDay. The registry is startup input: any row
//! that cannot be read or parsed makes the whole load fail with a config
//! error.

use std::path::Path;

use jobscout_shared::{JobScoutError, Result, SourceEntry, SourceKind};
use tracing::debug;

/// Read every registry row into a [`SourceEntry`] list.
pub fn load_registry(path: &Path) -> Result<Vec<SourceEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| {
            JobScoutError::config(format!("could not read registry {}: {e}", path.display()))
        })?;

    let mut entries = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            JobScoutError::config(format!("registry row {}: {e}", row + 1))
        })?;
        entries.push(parse_row(&record, row + 1)?);
    }

    debug!(path = %path.display(), entries = entries.len(), "loaded source registry");
    Ok(entries)
}

fn parse_row(record: &csv::StringRecord, row: usize) -> Result<SourceEntry> {
    if record.len() < 4 {
        return Err(JobScoutError::config(format!(
            "registry row {row}: expected 4 columns [ordinal, company, kind, locator], got {}",
            record.len()
        )));
    }

    let company = record[1].to_string();
    let tag: i64 = record[2].parse().map_err(|_| {
        JobScoutError::config(format!(
            "registry row {row}: kind tag {:?} is not an integer",
            &record[2]
        ))
    })?;
    let locator = record[3].to_string();

    if company.is_empty() || locator.is_empty() {
        return Err(JobScoutError::config(format!(
            "registry row {row}: company and locator must be non-empty"
        )));
    }

    Ok(SourceEntry {
        company,
        kind: SourceKind::from_registry_tag(tag),
        locator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_registry(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write registry");
        file
    }

    #[test]
    fn loads_rows_and_maps_kind_tags() {
        let file = write_registry(
            "ordinal,company,kind,locator\n\
             1,Acme,1,acme\n\
             2,Globex,2,https://globex.wd5.myworkdayjobs.com/Careers\n",
        );

        let entries = load_registry(file.path()).expect("load");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company, "Acme");
        assert_eq!(entries[0].kind, SourceKind::GreenHouse);
        assert_eq!(entries[0].locator, "acme");
        assert_eq!(entries[1].kind, SourceKind::WorkDay);
    }

    #[test]
    fn non_numeric_kind_tag_is_config_error() {
        let file = write_registry(
            "ordinal,company,kind,locator\n\
             1,Acme,greenhouse,acme\n",
        );

        let err = load_registry(file.path()).expect_err("must fail");
        assert!(matches!(err, JobScoutError::Config { .. }));
        assert!(err.to_string().contains("kind tag"));
    }

    #[test]
    fn short_row_is_config_error() {
        let file = write_registry(
            "ordinal,company,kind,locator\n\
             1,Acme,1\n",
        );

        assert!(load_registry(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = load_registry(Path::new("/nonexistent/JobLinks.csv")).expect_err("must fail");
        assert!(matches!(err, JobScoutError::Config { .. }));
    }
}
