//! Playstore top apps main entry point
//!
//! This is the command-line interface for the top-charts scraper.

use anyhow::Context;
use clap::Parser;
use playstore_top_apps::config::{load_or_default, validate, Config, DetailFailurePolicy};
use playstore_top_apps::output::print_summary;
use playstore_top_apps::scrape::{Coordinator, KeyMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Playstore top apps: a top-charts scraper
///
/// Lists the apps on the storefront's top chart, visits each app's detail
/// page and writes name, review count and last-update date to a TSV report.
/// With no arguments the report goes to ~/playstore-top-app-details.tsv.
#[derive(Parser, Debug)]
#[command(name = "playstore-top-apps")]
#[command(version)]
#[command(about = "Scrape the storefront top chart into a TSV report", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the report here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Abort the run when a single app's detail page cannot be scraped
    #[arg(long)]
    strict: bool,

    /// Deduplicate chart entries by app name or by detail link
    #[arg(long, value_enum, value_name = "KEY")]
    key_by: Option<KeyMode>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, hash) = match load_or_default(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    match (&cli.config, &hash) {
        (Some(path), Some(hash)) => {
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash)
        }
        _ => tracing::info!("Using built-in configuration"),
    }

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid command-line overrides")?;

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    handle_scrape(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("playstore_top_apps=info,warn"),
                1 => EnvFilter::new("playstore_top_apps=debug,info"),
                2 => EnvFilter::new("playstore_top_apps=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Folds command-line flags into the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(output) = &cli.output {
        config.output.path = Some(output.clone());
    }
    if cli.strict {
        config.run.on_detail_failure = DetailFailurePolicy::Abort;
    }
    if let Some(key_by) = cli.key_by {
        config.run.key_by = key_by;
    }
}

/// Handles the --dry-run mode: shows what a run would do
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Playstore Top Apps Dry Run ===\n");

    println!("Source:");
    println!("  Origin: {}", config.source.origin);
    println!("  Chart path: {}", config.source.chart_path);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nRun:");
    println!("  On detail failure: {:?}", config.run.on_detail_failure);
    println!("  Key by: {:?}", config.run.key_by);

    println!("\nSelectors:");
    println!("  App card: {}", config.selectors.app_card);
    println!("  App title: {}", config.selectors.app_title);
    println!("  App link: {}", config.selectors.app_link);
    println!("  Review count: {}", config.selectors.review_count);
    println!("  Info row: {}", config.selectors.info_row);
    println!("  Info value: {}", config.selectors.info_value);
    println!("  Updated marker: {:?}", config.selectors.updated_marker);

    let output = config.output.resolved_path()?;
    println!("\nOutput:");
    println!("  Report: {}", output.display());

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: Config, quiet: bool) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config)?;
    tracing::info!("Writing report to {}", coordinator.output_path().display());

    match coordinator.run().await {
        Ok(summary) => {
            tracing::info!(
                "Scrape completed: {} of {} apps written",
                summary.rows_written,
                summary.apps_listed
            );
            if !quiet {
                print_summary(&summary);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
