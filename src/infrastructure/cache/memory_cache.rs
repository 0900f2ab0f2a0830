//! In-process cache used when Redis is not configured.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

struct Entry {
    value: String,
    tags: Vec<String>,
    expires_at: Instant,
}

const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Tag-aware cache held in process memory.
///
/// An expired entry is dropped when it is next read. Keys that are never read
/// again are reclaimed by `set`: once the map is full, expired entries are
/// swept, and if it is still full the entry closest to expiry is evicted.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    default_ttl: Duration,
    max_entries: usize,
}

impl MemoryCache {
    /// Creates an empty cache applying `default_ttl_seconds` when `set` gets no TTL.
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self::with_capacity(default_ttl_seconds, DEFAULT_MAX_ENTRIES)
    }

    /// Like [`MemoryCache::new`], holding at most `max_entries` documents.
    pub fn with_capacity(default_ttl_seconds: u64, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl: Duration::from_secs(default_ttl_seconds),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored (possibly expired) entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Makes room for one more key in a full map.
fn reclaim(entries: &mut HashMap<String, Entry>, max_entries: usize, now: Instant) {
    if entries.len() < max_entries {
        return;
    }

    let before = entries.len();
    entries.retain(|_, entry| entry.expires_at > now);
    debug!("Cache SWEEP: {} expired entries", before - entries.len());

    if entries.len() >= max_entries {
        let soonest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = soonest {
            entries.remove(&key);
            debug!("Cache EVICT: {}", key);
        }
    }
}

fn poisoned() -> CacheError {
    CacheError::OperationError("memory cache lock poisoned".to_string())
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().map_err(|_| poisoned())?;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    debug!("Cache HIT: {}", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("Cache MISS: {}", key);
                    return Ok(None);
                }
            }
        }

        self.entries.write().map_err(|_| poisoned())?.remove(key);
        debug!("Cache EXPIRED: {}", key);
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        tags: &[&str],
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let ttl = ttl_seconds
            .map(Duration::from_secs)
            .unwrap_or(self.default_ttl);

        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            expires_at: now + ttl,
        };

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if !entries.contains_key(key) {
            reclaim(&mut entries, self.max_entries, now);
        }
        entries.insert(key.to_string(), entry);
        debug!("Cache SET: {} (TTL: {}s, tags: {:?})", key, ttl.as_secs(), tags);
        Ok(())
    }

    async fn invalidate_tag(&self, tag: &str) -> CacheResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
        debug!("Cache INVALIDATE tag {}: {} entries", tag, before - entries.len());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.entries.read().is_ok()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
