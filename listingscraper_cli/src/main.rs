mod commands;
mod output;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use listingscraper_lib::{PageFetcher, ScraperConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "listingscraper")]
#[command(about = "Scrape office listings and listing details from realestate.co.nz")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Seconds to wait between outbound requests (default 5)
    #[arg(long, global = true)]
    delay: Option<f64>,

    /// Site root to scrape, e.g. http://www.realestate.co.nz
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Maximum office pages to walk before giving up (0 = no limit)
    #[arg(long, global = true)]
    max_pages: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known office directory
    Offices,
    /// List listing IDs for an office
    Listings(commands::listings::ListingsArgs),
    /// Show details for a single listing
    Listing(commands::listing::ListingArgs),
    /// List an office's listings and extract every one
    Crawl(commands::crawl::CrawlArgs),
}

fn build_config(cli: &Cli) -> Result<ScraperConfig> {
    let mut config = ScraperConfig::from_env();
    if let Some(secs) = cli.delay {
        config.throttle_delay =
            Duration::try_from_secs_f64(secs).context("--delay must be a non-negative number")?;
    }
    if let Some(ref base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(max_pages) = cli.max_pages {
        config.max_pages = (max_pages > 0).then_some(max_pages);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("listingscraper=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);
    let config = build_config(&cli)?;

    let fetcher = PageFetcher::from_config(&config)?;

    match &cli.command {
        Commands::Offices => commands::offices::run(&format)?,
        Commands::Listings(args) => commands::listings::run(args, &fetcher, &config, &format).await?,
        Commands::Listing(args) => commands::listing::run(args, &fetcher, &config, &format).await?,
        Commands::Crawl(args) => commands::crawl::run(args, &fetcher, &config, &format).await?,
    }

    let stats = fetcher.stats();
    tracing::info!(
        "{} network requests, {} cache hits, {} pages cached",
        stats.network_requests,
        stats.cache_hits,
        fetcher.cached_pages()
    );

    Ok(())
}
