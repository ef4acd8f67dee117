//! Shared types, error model, and configuration for jobscout.
//!
//! This crate is the foundation depended on by all other jobscout crates.
//! It provides:
//! - [`JobScoutError`] — the unified error type
//! - Domain types ([`JobListing`], [`SourceEntry`], [`SourceKind`])
//! - The keyword matching policy ([`KeywordSet`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod keywords;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{AppConfig, load_config_from, write_default_config};
pub use error::{JobScoutError, Result};
pub use keywords::KeywordSet;
pub use types::{JobListing, SourceEntry, SourceKind};
