//! Error types for jobscout.
//!
//! Library crates use [`JobScoutError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all jobscout operations.
///
/// Only `Config` is fatal to the process; every other variant is caught at
/// the boundary of the unit of work that produced it.
#[derive(Debug, thiserror::Error)]
pub enum JobScoutError {
    /// Configuration or registry loading error. Fatal before any fetch.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport failure while talking to a source (DNS, refused, timeout,
    /// non-2xx status).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Remote payload was not valid JSON or did not match the expected shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Remote document could not be parsed as markup, or a locator could not
    /// be split into its expected pieces.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error, including sink append failures.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, JobScoutError>;

impl JobScoutError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a decode error from any displayable message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = JobScoutError::config("missing keywords");
        assert_eq!(err.to_string(), "config error: missing keywords");

        let err = JobScoutError::Fetch("acme: HTTP 503".into());
        assert!(err.to_string().contains("HTTP 503"));
    }
}
