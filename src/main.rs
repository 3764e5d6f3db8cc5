//! Mapscout main entry point
//!
//! This is the command-line interface for the Mapscout listing harvester.

use clap::Parser;
use mapscout::config::{load_config_with_hash, validate, Config};
use mapscout::output::{default_output_path, format_table, save_csv};
use mapscout::{scrape, EventBus, ScrapeEvent, ScrapeRequest};
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

/// Mapscout: a map directory listing harvester
///
/// Mapscout searches a map-based business directory in a headless browser,
/// opens up to N matching listings and exports their name, address, website,
/// phone number, reviews and coordinates as CSV.
#[derive(Parser, Debug)]
#[command(name = "mapscout")]
#[command(version = "1.0.0")]
#[command(about = "A map directory listing harvester", long_about = None)]
struct Cli {
    /// What to search for, e.g. "pizza in Brooklyn"
    #[arg(value_name = "QUERY")]
    query: String,

    /// Number of listings to collect (1-100)
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=100))]
    count: u64,

    /// Only search within this many miles of the queried place
    #[arg(short, long, value_name = "MILES")]
    radius: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// CSV output path [default: <QUERY>_google_maps_data.csv]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the scraped records as a table
    #[arg(long)]
    print: bool,

    /// Validate config and show what would be scraped without starting a browser
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let mut request = ScrapeRequest::new(cli.query.as_str(), cli.count as usize)?;
    if let Some(miles) = cli.radius {
        request = request.with_radius(miles);
    }
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.query));

    if cli.dry_run {
        handle_dry_run(&config, &request, &output)?;
    } else {
        handle_scrape(&config, &request, &output, cli.print).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mapscout=info,warn"),
            1 => EnvFilter::new("mapscout=debug,info"),
            2 => EnvFilter::new("mapscout=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(
    config: &Config,
    request: &ScrapeRequest,
    output: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    validate(config)?;

    println!("=== Mapscout Dry Run ===\n");

    println!("Request:");
    println!("  Query: {}", request.query());
    println!("  Listings: {}", request.count());
    println!("  Output: {}", output.display());

    println!("\nBrowser:");
    match &config.browser.executable {
        Some(path) => println!("  Executable: {}", path.display()),
        None => match mapscout::browser::find_chromium() {
            Some(path) => println!("  Executable: {} (found on PATH)", path.display()),
            None => println!("  Executable: not found"),
        },
    }
    println!("  Headless: {}", config.browser.headless);
    println!(
        "  Navigation timeout: {}ms",
        config.browser.navigation_timeout_ms
    );

    println!("\nDirectory:");
    println!("  Base URL: {}", config.directory.base_url);
    println!("  Listing anchor: {}", config.directory.listing_anchor);

    println!("\nDiscovery:");
    println!("  Max retries: {}", config.discovery.max_retries);
    println!("  Scroll delta: {}px", config.discovery.scroll_delta_px);

    println!("\nDelays:");
    for (name, ms) in config.delays.all() {
        println!("  {}: {}ms", name, ms);
    }

    println!("\nFields ({}):", config.fields.len());
    for locator in config.fields.iter() {
        println!("  - {}: {}", locator.name, locator.xpath);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would collect up to {} listings for {:?}",
        request.count(),
        request.query()
    );

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(
    config: &Config,
    request: &ScrapeRequest,
    output: &std::path::Path,
    print: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let events = EventBus::new();
    let mut rx = events.subscribe();

    let reporter = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => report_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("Event reporter skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let result = scrape(request, config, &events).await;

    // closing the bus lets the reporter drain and exit
    drop(events);
    let _ = reporter.await;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    if print {
        print!("{}", format_table(&report.records));
    }

    if report.records.is_empty() {
        tracing::warn!("No listings were scraped; nothing written");
    } else {
        save_csv(&report.records, output)?;
        println!(
            "✓ Saved {} listings to {}",
            report.records.len(),
            output.display()
        );
    }

    Ok(())
}

/// Renders one scrape event as a log line
fn report_event(event: &ScrapeEvent) {
    match event {
        ScrapeEvent::SearchSubmitted { query } => {
            tracing::debug!("Search submitted: {}", query);
        }
        ScrapeEvent::ScrollProgress {
            iteration,
            rendered,
        } => {
            tracing::info!("Scroll {}: {} listings found", iteration, rendered);
        }
        ScrapeEvent::DiscoveryRetry {
            attempt,
            max_retries,
            error,
        } => {
            tracing::warn!(
                "Discovery failed (attempt {}/{}): {}",
                attempt,
                max_retries,
                error
            );
        }
        ScrapeEvent::DiscoveryFinished { state, listings } => {
            tracing::debug!("Discovery {}: {} listings", state, listings);
        }
        ScrapeEvent::ListingExtracted {
            index,
            name,
            fields_found,
        } => {
            tracing::info!(
                "Listing {}: {} ({} fields)",
                index + 1,
                name.as_deref().unwrap_or("<unnamed>"),
                fields_found
            );
        }
        ScrapeEvent::ListingFailed { index, error } => {
            tracing::warn!("Skipped listing {}: {}", index + 1, error);
        }
        ScrapeEvent::SessionCloseFailed { error } => {
            tracing::warn!("Failed to close browser: {}", error);
        }
        ScrapeEvent::ScrapeFinished { records, failures } => {
            tracing::debug!("Finished with {} records, {} failures", records, failures);
        }
    }
}
