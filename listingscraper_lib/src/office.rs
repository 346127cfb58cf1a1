//! Office profile crawling: walks an office's paginated listing pages and
//! collects the listing ids they advertise.

use scraper::Html;

use crate::config::{ScraperConfig, DEFAULT_BASE_URL, DEFAULT_MAX_PAGES};
use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::parse::{attr, first_digits, selector, text_of};

/// Link text that marks a page as having a successor.
const NEXT_PAGE_TEXT: &str = "Next Page";

/// Offices in the Wellington region, by branch name.
pub const KNOWN_OFFICES: &[(&str, &str)] = &[
    ("Porirua", "3521"),
    ("Paremata", "3551"),
    ("Tawa", "3534"),
    ("Whitby", "3541"),
    ("Otaki", "1756"),
    ("Waikanae", "1703"),
    ("Paraparaumu", "1663"),
];

/// Maps a known office name (case-insensitive) to its id. Anything else is
/// assumed to already be an office id and is returned unchanged.
pub fn resolve_office(name_or_id: &str) -> String {
    let trimmed = name_or_id.trim();
    KNOWN_OFFICES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

pub struct OfficeCrawler<'a> {
    fetcher: &'a PageFetcher,
    base_url: String,
    max_pages: Option<u32>,
}

impl<'a> OfficeCrawler<'a> {
    pub fn new(fetcher: &'a PageFetcher) -> Self {
        Self {
            fetcher,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }

    pub fn from_config(fetcher: &'a PageFetcher, config: &ScraperConfig) -> Self {
        Self::new(fetcher)
            .with_base_url(&config.base_url)
            .with_max_pages(config.max_pages)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Caps how many pages a crawl may visit. `None` trusts the site to
    /// eventually serve a page without a next link.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn listings_page_url(&self, office_id: &str, page: u32) -> String {
        format!("{}/profile/office/{}/page{}", self.base_url, office_id, page)
    }

    /// Collects every listing id for `office_id`, in page order and then
    /// document order, following "Next Page" links from page 1.
    pub async fn list_listing_ids(&self, office_id: &str) -> Result<Vec<String>, ScrapeError> {
        let mut listing_ids = Vec::new();
        let mut page = 1u32;

        loop {
            if let Some(limit) = self.max_pages {
                if page > limit {
                    tracing::warn!(
                        "office {} still paginating after {} pages, giving up",
                        office_id,
                        limit
                    );
                    return Err(ScrapeError::PageLimitExceeded {
                        office_id: office_id.to_string(),
                        limit,
                    });
                }
            }

            let url = self.listings_page_url(office_id, page);
            let html = self.fetcher.fetch(&url).await?;
            let (ids, last) = parse_listings_page(&html)?;
            listing_ids.extend(ids);

            tracing::debug!("page {}: listings found so far: {}", page, listing_ids.len());
            if last {
                break;
            }
            page += 1;
        }

        tracing::info!(
            "office {}: {} listings across {} pages",
            office_id,
            listing_ids.len(),
            page
        );
        Ok(listing_ids)
    }
}

/// Listing ids on one office page, and whether it is the last page.
pub fn parse_listings_page(html: &str) -> Result<(Vec<String>, bool), ScrapeError> {
    let document = Html::parse_document(html);
    let ids = listing_ids_on_page(&document)?;
    let last = is_last_page(&document)?;
    Ok((ids, last))
}

/// Ids of every `div.listing` container, from the numeric part of its `id`.
pub fn listing_ids_on_page(document: &Html) -> Result<Vec<String>, ScrapeError> {
    let sel = selector("div.listing")?;
    document
        .select(&sel)
        .map(|container| {
            let id = attr(container, "id", "div.listing")?;
            extract_listing_id(id)
        })
        .collect()
}

/// A page is the last one when no link reads exactly "Next Page".
pub fn is_last_page(document: &Html) -> Result<bool, ScrapeError> {
    let links = selector("a")?;
    Ok(!document
        .select(&links)
        .any(|a| text_of(a) == NEXT_PAGE_TEXT))
}

/// Numeric part of a listing container id: `"listing-98765"` gives `"98765"`.
pub fn extract_listing_id(text: &str) -> Result<String, ScrapeError> {
    first_digits(text)
}
