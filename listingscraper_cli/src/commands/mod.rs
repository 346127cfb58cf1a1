//! CLI subcommand implementations.

pub mod crawl;
pub mod listing;
pub mod listings;
pub mod offices;
