//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use jobscout_shared::{KeywordSet, load_config_from, write_default_config};
use jobscout_sources::Orchestrator;
use jobscout_storage::{CsvSink, load_registry};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// jobscout — aggregate job postings from employer career sites.
#[derive(Parser)]
#[command(
    name = "jobscout",
    version,
    about = "Fetch postings from GreenHouse, WorkDay, and LeverCo boards and append keyword matches to a CSV.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch every registered source once and append matches to the sink.
    Run {
        /// Path to the JSON config file.
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Concurrent fetch units.
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// Extra LeverCo boards as COMPANY=URL, polled after the registry.
        #[arg(long = "lever", value_name = "COMPANY=URL")]
        lever: Vec<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a starter config.json in the current directory.
    Init,
    /// Print the parsed config.
    Show {
        /// Path to the JSON config file.
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "jobscout=info",
        1 => "jobscout=debug",
        _ => "jobscout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            config,
            concurrency,
            lever,
        } => cmd_run(&config, concurrency, &lever).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show { config } => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_run(config_path: &Path, concurrency: usize, lever: &[String]) -> Result<()> {
    // Config problems are the only fatal errors; everything past this point
    // is reported per source.
    let config = load_config_from(config_path)?;
    let lever_boards = parse_lever_args(lever)?;

    let keywords = KeywordSet::new(config.keywords.clone());
    if keywords.is_empty() {
        warn!("keyword set is empty: no listing can match");
    }

    let entries = load_registry(Path::new(&config.company_list_csv_path))?;
    let sink = Arc::new(CsvSink::new(&config.job_list_csv_path));
    let orchestrator = Orchestrator::new(keywords, concurrency)?;

    info!(
        sources = entries.len(),
        lever_boards = lever_boards.len(),
        concurrency,
        "starting run"
    );
    let report = orchestrator.run(entries, Arc::clone(&sink)).await;

    let mut failures = report.failures.clone();
    let mut matched = report.listings_matched;
    let mut succeeded = report.sources_succeeded;

    for (company, url) in lever_boards {
        match orchestrator.run_lever_board(&company, &url, &sink).await {
            Ok(n) => {
                matched += n;
                succeeded += 1;
            }
            Err(e) => {
                warn!(company = %company, error = %e, "lever board failed");
                failures.push((company, e.to_string()));
            }
        }
    }

    println!(
        "Run complete in {:.1}s: {succeeded} sources succeeded, {} failed.",
        report.duration.as_secs_f64(),
        failures.len(),
    );
    println!(
        "{matched} matching listings appended to {}",
        config.job_list_csv_path
    );
    for (company, error) in &failures {
        println!("  failed: {company}: {error}");
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = Path::new("config.json");
    write_default_config(path)?;
    println!("Wrote starter config to {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: &Path) -> Result<()> {
    let config = load_config_from(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Parse repeated `--lever COMPANY=URL` flags.
fn parse_lever_args(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .filter(|(company, url)| !company.is_empty() && !url.is_empty())
                .map(|(company, url)| (company.to_string(), url.to_string()))
                .ok_or_else(|| eyre!("--lever expects COMPANY=URL, got {arg:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lever_args_split_on_first_equals() {
        let parsed = parse_lever_args(&[
            "Initech=https://jobs.lever.co/initech".to_string(),
            "Hooli=https://jobs.lever.co/hooli?foo=bar".to_string(),
        ])
        .expect("parse");

        assert_eq!(parsed[0].0, "Initech");
        assert_eq!(parsed[1].1, "https://jobs.lever.co/hooli?foo=bar");
    }

    #[test]
    fn malformed_lever_arg_is_rejected() {
        assert!(parse_lever_args(&["Initech".to_string()]).is_err());
        assert!(parse_lever_args(&["=https://jobs.lever.co/x".to_string()]).is_err());
        assert!(parse_lever_args(&["Initech=".to_string()]).is_err());
    }

    #[test]
    fn cli_parses_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "jobscout",
            "run",
            "--config",
            "/etc/jobscout/config.json",
            "--concurrency",
            "8",
            "--lever",
            "Initech=https://jobs.lever.co/initech",
        ])
        .expect("parse CLI");

        match cli.command {
            Command::Run {
                config,
                concurrency,
                lever,
            } => {
                assert_eq!(config, PathBuf::from("/etc/jobscout/config.json"));
                assert_eq!(concurrency, 8);
                assert_eq!(lever.len(), 1);
            }
            _ => panic!("expected run subcommand"),
        }
    }
}
