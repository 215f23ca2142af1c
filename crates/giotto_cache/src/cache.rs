//! Completion result cache implementation.

use derive_getters::Getters;
use giotto_core::{CompletionResult, Fingerprint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache entry with value and optional expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    result: CompletionResult,
    created_at: Instant,
    ttl: Option<Duration>,
}

impl CacheEntry {
    /// Check if this entry is expired. Entries without a TTL never expire.
    pub fn is_expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => self.created_at.elapsed() > ttl,
            None => false,
        }
    }

    /// Get remaining time until expiration, if a TTL is set.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl?.checked_sub(self.created_at.elapsed())
    }
}

/// Configuration for the response cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct ResponseCacheConfig {
    /// TTL for cached entries in seconds; entries live forever when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    ttl_secs: Option<u64>,

    /// Maximum cache size (number of entries)
    #[serde(default = "default_max_size")]
    #[builder(default = "default_max_size()")]
    max_size: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,
}

fn default_max_size() -> usize {
    1000
}

fn default_enabled() -> bool {
    true
}

impl Default for ResponseCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: None,
            max_size: default_max_size(),
            enabled: default_enabled(),
        }
    }
}

/// Cache of decoded completion results keyed by request fingerprint.
///
/// Consulted only for non-streaming calls, before any token or rate-limit
/// work. Entries are insertion-ordered; when the cache is full the oldest
/// entry is evicted. There is no expiry unless a TTL is configured —
/// clearing is otherwise an explicit operator action.
///
/// # Example
///
/// ```
/// use giotto_cache::{ResponseCache, ResponseCacheConfig};
/// use giotto_core::{ChatMessage, CompletionResult, Fingerprint};
///
/// let mut cache = ResponseCache::new(ResponseCacheConfig::default());
///
/// let messages = vec![ChatMessage::user("What is entropy?")];
/// let key = Fingerprint::of_messages(&messages);
///
/// cache.insert(key.clone(), CompletionResult::raw("disorder"));
/// assert!(cache.get(&key).is_some());
/// ```
pub struct ResponseCache {
    config: ResponseCacheConfig,
    entries: HashMap<Fingerprint, CacheEntry>,
    insertion_order: Vec<Fingerprint>,
}

impl ResponseCache {
    /// Create a new response cache with configuration.
    pub fn new(config: ResponseCacheConfig) -> Self {
        tracing::debug!(
            ttl_secs = ?config.ttl_secs,
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating new ResponseCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            insertion_order: Vec::new(),
        }
    }

    /// Insert a decoded result into the cache.
    #[tracing::instrument(skip(self, result), fields(cache_size = self.entries.len()))]
    pub fn insert(&mut self, key: Fingerprint, result: CompletionResult) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        let ttl = self.config.ttl_secs.map(Duration::from_secs);
        let entry = CacheEntry {
            result,
            created_at: Instant::now(),
            ttl,
        };

        // Evict if at capacity
        if self.entries.len() >= self.config.max_size && !self.entries.contains_key(&key) {
            self.evict_oldest();
        }

        if let Some(pos) = self.insertion_order.iter().position(|k| k == &key) {
            self.insertion_order.remove(pos);
        }
        self.insertion_order.push(key.clone());

        self.entries.insert(key, entry);
    }

    /// Get a cached result.
    ///
    /// Returns None if:
    /// - No entry exists for the fingerprint
    /// - The entry is expired
    /// - The cache is disabled
    #[tracing::instrument(skip(self, key), fields(cache_size = self.entries.len()))]
    pub fn get(&mut self, key: &Fingerprint) -> Option<CompletionResult> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, returning None");
            return None;
        }

        let entry = self.entries.get(key)?;
        if entry.is_expired() {
            tracing::debug!("Cache entry expired, removing");
            self.entries.remove(key);
            if let Some(pos) = self.insertion_order.iter().position(|k| k == key) {
                self.insertion_order.remove(pos);
            }
            return None;
        }

        tracing::debug!(time_remaining = ?entry.time_remaining(), "Cache hit");
        Some(entry.result().clone())
    }

    /// Remove expired entries from the cache.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();

        let expired: Vec<Fingerprint> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.entries.remove(key);
            if let Some(pos) = self.insertion_order.iter().position(|k| k == key) {
                self.insertion_order.remove(pos);
            }
        }

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = self.entries.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Clear all cache entries. Explicit operator action.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.insertion_order.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict the oldest inserted entry.
    fn evict_oldest(&mut self) {
        if !self.insertion_order.is_empty() {
            let key = self.insertion_order.remove(0);
            tracing::debug!(fingerprint = %key, "Evicting oldest entry");
            self.entries.remove(&key);
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(ResponseCacheConfig::default())
    }
}
