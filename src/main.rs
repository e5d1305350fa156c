//! Listing Harvester main entry point
//!
//! Command-line interface for the batch harvest run.

use clap::Parser;
use listing_harvester::config::load_config_with_hash;
use listing_harvester::harvest::{run_harvest, SheetOutcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Listing Harvester
///
/// Scrapes listing data from the configured seller storefronts and
/// forwards the normalized records to the external spreadsheet-backed
/// service, one sheet at a time.
#[derive(Parser, Debug)]
#[command(name = "listing-harvester")]
#[command(version)]
#[command(about = "Harvest seller listings into spreadsheet sheets", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without any network traffic
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    // A sheet failure is recorded in the summary, not an error: the run
    // always attempts every sheet and exits zero even on partial failure.
    let summary = run_harvest(config).await?;

    println!("=== Harvest Summary ===");
    for report in &summary.reports {
        match &report.outcome {
            SheetOutcome::Delivered { rows, dedup_ack, .. } => {
                println!("  {} delivered: {} rows ({})", report.sheet, rows, dedup_ack);
            }
            SheetOutcome::ResolutionFailed => {
                println!("  {} skipped: seller URL not resolved", report.sheet);
            }
            SheetOutcome::ScrapeFailed { message } => {
                println!("  {} scrape failed: {}", report.sheet, message);
            }
            SheetOutcome::DispatchFailed { message } => {
                println!("  {} dispatch failed: {}", report.sheet, message);
            }
        }
    }
    println!(
        "{} delivered, {} failed, {} rows sent",
        summary.delivered(),
        summary.failed(),
        summary.total_rows()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_harvester=info,warn"),
            1 => EnvFilter::new("listing_harvester=debug,info"),
            2 => EnvFilter::new("listing_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &listing_harvester::config::Config, config_hash: &str) {
    println!("=== Listing Harvester Dry Run ===\n");

    println!("Config hash: {}", config_hash);

    println!("\nService endpoints:");
    println!("  Read:  {}", config.service.read_url);
    println!("  Write: {}", config.service.write_url);

    println!("\nScrape:");
    println!("  User agent: {}", config.scrape.user_agent);
    println!("  Timeout: {}s", config.scrape.timeout_secs);

    println!("\nSheets ({}):", config.sheets.len());
    for sheet in &config.sheets {
        println!("  - {}", sheet);
    }

    if let Some(oauth) = &config.oauth {
        println!("\nOAuth:");
        println!("  Client ID: {}", oauth.client_id);
        println!("  Redirect URI: {}", oauth.redirect_uri);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would harvest {} sheets", config.sheets.len());
}
