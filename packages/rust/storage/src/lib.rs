//! Tabular inputs and outputs for jobscout.
//!
//! This crate owns both ends of the pipeline's persistence:
//! - [`registry`] — reads the source registry CSV into [`SourceEntry`] rows
//! - [`sink`] — the append-only CSV sink matched listings are written to
//!
//! [`SourceEntry`]: jobscout_shared::SourceEntry

pub mod registry;
pub mod sink;

pub use registry::load_registry;
pub use sink::CsvSink;
