//! Listing-Tide main entry point
//!
//! This is the command-line interface for the Listing-Tide article watcher.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use listing_tide::checkpoint::{CheckpointStore, FileCheckpoint};
use listing_tide::config::{load_config_with_hash, Config};
use listing_tide::crawler::{run_periodic, Coordinator, ScheduleOptions};
use listing_tide::output::{ArticleSink, JsonLinesSink, TextSink};
use listing_tide::url::{listing_base, page_url};
use std::io;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Listing-Tide: an incremental article listing watcher
///
/// Listing-Tide checks a paginated article listing, reports the articles
/// published since its last run, and remembers how far it got.
#[derive(Parser, Debug)]
#[command(name = "listing-tide")]
#[command(version)]
#[command(about = "An incremental article listing watcher", long_about = None)]
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

    /// Run a single crawl cycle and exit
    #[arg(long)]
    once: bool,

    /// Wait one check interval before the first cycle
    #[arg(long, conflicts_with = "once")]
    delay_first: bool,

    /// How new articles are written to stdout
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Validate config and show what would be fetched without fetching
    #[arg(long, conflicts_with_all = ["reset", "once"])]
    dry_run: bool,

    /// Delete the checkpoint so the next cycle is a first run, then exit
    #[arg(long, conflicts_with_all = ["dry_run", "once"])]
    reset: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON object per article
    Json,
    /// Human-readable announcement
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the articles
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.reset {
        handle_reset(&config)?;
    } else {
        handle_watch(&config, &cli).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_tide=info,warn"),
            1 => EnvFilter::new("listing_tide=debug,info"),
            2 => EnvFilter::new("listing_tide=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration and plan
fn handle_dry_run(config: &Config) {
    println!("=== Listing-Tide Dry Run ===\n");

    println!("Site: {}", config.site.url);

    println!("\nCrawl:");
    println!("  Max pages per cycle: {}", config.crawl.max_pages);
    println!("  First-run skip: {}", config.crawl.first_run_skip);
    println!("  Politeness delay: {}ms", config.crawl.politeness_delay_ms);

    println!("\nFetch:");
    println!("  Attempts: {}", config.fetch.retry);
    println!("  Base retry delay: {}s", config.fetch.retry_delay_secs);
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  User agent: {}", config.fetch.user_agent());

    println!("\nSchedule:");
    println!(
        "  Check interval: {} minute(s)",
        config.schedule.check_interval_minutes
    );

    let checkpoint = FileCheckpoint::new(&config.checkpoint.path);
    println!("\nCheckpoint: {}", checkpoint.path().display());
    match checkpoint.load() {
        Some(id) => {
            println!("  Current value: {}", id);
            println!("\nNext cycle is incremental and may fetch:");
            for page in 1..=config.crawl.max_pages {
                println!("  * {}", page_url(&config.site.url, page));
            }
        }
        None => {
            println!("  Current value: none");
            println!("\nNext cycle is a first run and fetches:");
            println!("  * {}", page_url(&config.site.url, 1));
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --reset mode: removes the checkpoint
fn handle_reset(config: &Config) -> anyhow::Result<()> {
    let checkpoint = FileCheckpoint::new(&config.checkpoint.path);
    let previous = checkpoint.load();
    checkpoint
        .clear()
        .context("failed to reset checkpoint")?;

    match previous {
        Some(id) => println!(
            "✓ Checkpoint {} removed from {}",
            id,
            checkpoint.path().display()
        ),
        None => println!("✓ No checkpoint at {}", checkpoint.path().display()),
    }
    Ok(())
}

/// Handles the main mode: one cycle with --once, otherwise a periodic loop
async fn handle_watch(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let coordinator =
        Coordinator::from_config(config).context("failed to set up the crawler")?;

    let mut sink: Box<dyn ArticleSink> = match cli.format {
        Format::Json => Box::new(JsonLinesSink::new(io::stdout())),
        Format::Text => Box::new(TextSink::new(
            io::stdout(),
            listing_base(&config.site.url).to_string(),
        )),
    };

    if cli.once {
        let report = coordinator.run_cycle().await;
        sink.deliver(&report.articles)
            .context("failed to write articles")?;
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received, stopping after the current cycle");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                tracing::error!("Failed to listen for interrupt: {}", e);
                // Keep the sender alive so the loop is not stopped by the drop
                std::future::pending::<()>().await;
            }
        }
    });

    let options = ScheduleOptions {
        interval: config.schedule.interval(),
        run_immediately: !cli.delay_first,
    };
    tracing::info!(
        "Watching {} every {} minute(s)",
        config.site.url,
        config.schedule.check_interval_minutes
    );

    run_periodic(&coordinator, sink.as_mut(), options, shutdown_rx).await;
    Ok(())
}
