//! In-memory page cache backed by `DashMap`.

use dashmap::DashMap;

/// Unbounded map from URL to raw page body.
///
/// Entries are never evicted or replaced: the first body stored for a URL
/// is the one every later lookup sees.
#[derive(Default)]
pub struct PageCache {
    store: DashMap<String, String>,
}

impl PageCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `url`, or `None` if it was never fetched.
    pub fn get(&self, url: &str) -> Option<String> {
        self.store.get(url).map(|entry| entry.value().clone())
    }

    /// Stores `body` under `url` unless an entry already exists, and returns
    /// whichever body the cache now holds.
    pub fn insert(&self, url: &str, body: String) -> String {
        self.store
            .entry(url.to_string())
            .or_insert(body)
            .value()
            .clone()
    }

    /// Returns true if a body is stored for `url`.
    pub fn contains(&self, url: &str) -> bool {
        self.store.contains_key(url)
    }

    /// Number of cached URLs.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
