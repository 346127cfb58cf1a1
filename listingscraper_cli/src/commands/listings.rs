use anyhow::Result;
use clap::Args;
use listingscraper_lib::{resolve_office, OfficeCrawler, PageFetcher, ScraperConfig};

use crate::output::{print_listing_ids, OutputFormat};

#[derive(Args)]
pub struct ListingsArgs {
    /// Office name (e.g. Porirua) or numeric office ID
    pub office: String,
}

pub async fn run(
    args: &ListingsArgs,
    fetcher: &PageFetcher,
    config: &ScraperConfig,
    format: &OutputFormat,
) -> Result<()> {
    let office_id = resolve_office(&args.office);
    let crawler = OfficeCrawler::from_config(fetcher, config);
    let ids = crawler.list_listing_ids(&office_id).await?;

    eprintln!("{} listings for office {}", ids.len(), office_id);
    print_listing_ids(&ids, format)
}
