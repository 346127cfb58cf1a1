//! Runtime configuration, with environment overrides.

use std::time::Duration;

use crate::throttle::DEFAULT_THROTTLE_DELAY;

pub const DEFAULT_BASE_URL: &str = "http://www.realestate.co.nz";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Upper bound on office pages walked before a crawl is abandoned.
pub const DEFAULT_MAX_PAGES: u32 = 200;

/// Settings shared by the fetcher and the crawlers built on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub base_url: String,
    pub throttle_delay: Duration,
    pub request_timeout: Duration,
    /// `None` disables the pagination guard.
    pub max_pages: Option<u32>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            throttle_delay: DEFAULT_THROTTLE_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_pages: Some(DEFAULT_MAX_PAGES),
        }
    }
}

impl ScraperConfig {
    /// Builds a config from `LISTINGSCRAPER_*` environment variables.
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("LISTINGSCRAPER_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        let throttle_delay = lookup("LISTINGSCRAPER_THROTTLE_SECS")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .unwrap_or(defaults.throttle_delay);

        let request_timeout = lookup("LISTINGSCRAPER_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let max_pages = match lookup("LISTINGSCRAPER_MAX_PAGES").map(|v| v.trim().parse::<u32>()) {
            Some(Ok(0)) => None,
            Some(Ok(n)) => Some(n),
            _ => defaults.max_pages,
        };

        Self {
            base_url,
            throttle_delay,
            request_timeout,
            max_pages,
        }
    }
}
