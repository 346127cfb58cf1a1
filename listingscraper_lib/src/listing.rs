//! Listing detail extraction.

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::config::{ScraperConfig, DEFAULT_BASE_URL};
use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::parse::{attr, find_first, find_within, first_child_text, selector, text_of, trailing_digits};

const HEADER_DETAILS: &str = "div.headerDetails";
const BREADCRUMBS: &str = "#breadcrumbs";
/// Matched on the whole class attribute, not on individual class tokens.
const DESCRIPTION: &str = r#"div[class="description detailsPage"]"#;
const AGENCY_DETAILS: &str = "div.agencyDetailsBox";

/// Fields scraped from one listing detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub listing_id: String,
    pub heading: String,
    pub price: String,
    /// Breadcrumb trail below the site root, broadest first.
    pub address: Vec<String>,
    pub description: String,
    pub agency_id: String,
}

pub struct ListingExtractor<'a> {
    fetcher: &'a PageFetcher,
    base_url: String,
}

impl<'a> ListingExtractor<'a> {
    pub fn new(fetcher: &'a PageFetcher) -> Self {
        Self {
            fetcher,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_config(fetcher: &'a PageFetcher, config: &ScraperConfig) -> Self {
        Self::new(fetcher).with_base_url(&config.base_url)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn listing_url(&self, listing_id: &str) -> String {
        format!("{}/{}", self.base_url, listing_id)
    }

    pub async fn get_detail(&self, listing_id: &str) -> Result<ListingRecord, ScrapeError> {
        let url = self.listing_url(listing_id);
        let html = self.fetcher.fetch(&url).await?;
        parse_listing_detail(listing_id, &html)
    }
}

/// Extracts a [`ListingRecord`] from a detail page. Any missing container
/// or element fails the whole extraction.
pub fn parse_listing_detail(listing_id: &str, html: &str) -> Result<ListingRecord, ScrapeError> {
    let document = Html::parse_document(html);

    let header = find_first(&document, HEADER_DETAILS)?;
    let heading = text_of(find_within(header, "h1", HEADER_DETAILS)?);
    let price_heading = find_within(header, "h3", HEADER_DETAILS)?;
    let price = first_child_text(price_heading)
        .ok_or_else(|| ScrapeError::MissingElement(format!("price text in {} h3", HEADER_DETAILS)))?
        .trim()
        .to_string();

    let breadcrumbs = find_first(&document, BREADCRUMBS)?;
    let links = selector("a")?;
    let address = breadcrumbs.select(&links).skip(1).map(text_of).collect();

    let description_box = find_first(&document, DESCRIPTION)?;
    let description = text_of(find_within(description_box, "p", DESCRIPTION)?);

    let agency_box = find_first(&document, AGENCY_DETAILS)?;
    let agency_link = find_within(agency_box, "a", AGENCY_DETAILS)?;
    let class_attr = attr(agency_link, "class", "agency link")?;
    let first_class = class_attr
        .split_whitespace()
        .next()
        .ok_or_else(|| ScrapeError::MissingAttribute {
            element: "agency link".to_string(),
            attribute: "class".to_string(),
        })?;
    let agency_id = trailing_digits(first_class)?;

    Ok(ListingRecord {
        listing_id: listing_id.to_string(),
        heading,
        price,
        address,
        description,
        agency_id,
    })
}
