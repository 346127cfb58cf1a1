//! Library layer for the realestate.co.nz scraper: a cached, throttled page
//! fetcher, the office listing crawler, and the listing detail extractor.
//!
//! One [`PageFetcher`] is meant to be shared by every crawler in a run so
//! that its URL cache and request spacing apply across all of them.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod office;
pub mod parse;
pub mod throttle;

pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use fetch::{FetchStats, PageFetcher};
pub use listing::{ListingExtractor, ListingRecord};
pub use office::{resolve_office, OfficeCrawler, KNOWN_OFFICES};
