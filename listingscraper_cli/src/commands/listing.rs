use anyhow::Result;
use clap::Args;
use listingscraper_lib::{ListingExtractor, PageFetcher, ScraperConfig};

use crate::output::{print_json, print_listings, OutputFormat};

#[derive(Args)]
pub struct ListingArgs {
    /// Listing ID, as shown in the listing URL
    pub listing_id: String,
}

pub async fn run(
    args: &ListingArgs,
    fetcher: &PageFetcher,
    config: &ScraperConfig,
    format: &OutputFormat,
) -> Result<()> {
    let extractor = ListingExtractor::from_config(fetcher, config);
    let record = extractor.get_detail(&args.listing_id).await?;

    match format {
        OutputFormat::Json => print_json(&record),
        _ => print_listings(std::slice::from_ref(&record), format)?,
    }
    Ok(())
}
