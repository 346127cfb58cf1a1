//! Cached, throttled page fetcher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::cache::PageCache;
use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::throttle::Throttle;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:122.0) Gecko/20100101 Firefox/122.0",
];

fn pick_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Fetches raw HTML pages, memoizing bodies by URL and spacing network
/// requests by the configured throttle delay.
///
/// Cache hits bypass both the network and the throttle. Share one fetcher
/// between crawlers to share its cache and request clock.
pub struct PageFetcher {
    http: reqwest::Client,
    cache: PageCache,
    throttle: Throttle,
    stats: StatsCounters,
}

impl PageFetcher {
    /// Creates a fetcher with the default 5 second throttle.
    pub fn new() -> Result<Self, ScrapeError> {
        Self::from_config(&ScraperConfig::default())
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Self::build(config.throttle_delay, config.request_timeout)
    }

    /// Creates a fetcher with a custom throttle delay and default timeout.
    pub fn with_throttle(delay: Duration) -> Result<Self, ScrapeError> {
        Self::build(delay, ScraperConfig::default().request_timeout)
    }

    fn build(delay: Duration, timeout: Duration) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .user_agent(pick_user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            cache: PageCache::new(),
            throttle: Throttle::new(delay),
            stats: StatsCounters::default(),
        })
    }

    pub fn throttle_delay(&self) -> Duration {
        self.throttle.delay()
    }

    /// Returns the body for `url`, from cache when possible.
    ///
    /// Transport failures and non-success statuses are returned as errors
    /// and leave the cache untouched.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        if let Some(body) = self.cache.get(url) {
            tracing::debug!("cache hit: {}", url);
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(body);
        }

        self.throttle.acquire().await;
        self.stats.network_requests.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("fetching {}", url);

        let resp = self
            .http
            .get(url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-NZ,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("request to {} failed: {}", url, e);
                ScrapeError::Http(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("{} returned {}", url, status);
            return Err(ScrapeError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        Ok(self.cache.insert(url, body))
    }

    /// Number of distinct URLs held in the cache.
    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }

    pub fn stats(&self) -> FetchStats {
        FetchStats {
            network_requests: self.stats.network_requests.load(Ordering::Relaxed),
            cache_hits: self.stats.cache_hits.load(Ordering::Relaxed),
        }
    }
}

#[derive(Default)]
struct StatsCounters {
    network_requests: AtomicU64,
    cache_hits: AtomicU64,
}

/// Snapshot of fetcher activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchStats {
    /// Requests that went out on the network, including failed ones.
    pub network_requests: u64,
    pub cache_hits: u64,
}
