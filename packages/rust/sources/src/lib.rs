//! Source adapters, normalization, and the concurrent fetch engine.
//!
//! This crate provides:
//! - [`adapters`] — one adapter per career-site backend (GreenHouse JSON,
//!   WorkDay JSON, LeverCo HTML), converged on a single
//!   fetch-and-normalize interface
//! - [`normalize`] — pure mapping from each backend's wire records into
//!   the canonical listing shape
//! - [`engine`] — the orchestrator fanning one unit of work out per
//!   registry entry and joining the whole batch

pub mod adapters;
pub mod engine;
mod normalize;

pub use adapters::{
    AdapterSet, GreenHouseAdapter, LeverCoAdapter, LeverCoJobPosting, SourceAdapter,
    WorkDayAdapter, derive_api_link,
};
pub use engine::{Orchestrator, RunReport};
