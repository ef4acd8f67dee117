//! jobscout CLI — multi-source job posting aggregator.
//!
//! Polls registered employer career-site backends, normalizes their
//! postings into one schema, and appends keyword matches to a CSV.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
