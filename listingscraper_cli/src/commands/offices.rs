use anyhow::Result;
use listingscraper_lib::KNOWN_OFFICES;

use crate::output::{print_offices, OutputFormat};

pub fn run(format: &OutputFormat) -> Result<()> {
    print_offices(KNOWN_OFFICES, format)
}
