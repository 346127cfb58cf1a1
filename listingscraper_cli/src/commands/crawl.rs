use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use listingscraper_lib::{resolve_office, ListingExtractor, OfficeCrawler, PageFetcher, ScraperConfig};

use crate::output::{print_listings, OutputFormat};

#[derive(Args)]
pub struct CrawlArgs {
    /// Office name (e.g. Porirua) or numeric office ID
    pub office: String,

    /// Only extract the first N listings
    #[arg(long)]
    pub limit: Option<usize>,
}

pub async fn run(
    args: &CrawlArgs,
    fetcher: &PageFetcher,
    config: &ScraperConfig,
    format: &OutputFormat,
) -> Result<()> {
    let office_id = resolve_office(&args.office);
    let crawler = OfficeCrawler::from_config(fetcher, config);
    let extractor = ListingExtractor::from_config(fetcher, config);

    let mut ids = crawler.list_listing_ids(&office_id).await?;
    if let Some(limit) = args.limit {
        ids.truncate(limit);
    }

    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} listings {msg} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut records = Vec::with_capacity(ids.len());
    for id in &ids {
        pb.set_message(id.clone());
        let record = extractor
            .get_detail(id)
            .await
            .with_context(|| format!("extracting listing {}", id))?;
        records.push(record);
        pb.inc(1);
    }
    pb.finish_and_clear();

    eprintln!(
        "Extracted {} listings for office {}",
        records.len(),
        office_id
    );
    print_listings(&records, format)
}
