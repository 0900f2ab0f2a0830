//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Tag-aware key/value cache for rendered documents.
///
/// Every entry may carry tags; [`CacheService::invalidate_tag`] drops all
/// entries sharing a tag without the caller knowing their keys.
///
/// Reads and writes fail open: a broken backend behaves like an empty cache
/// instead of failing the request. Only [`CacheService::invalidate_tag`]
/// reports backend errors.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with tag sets
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or backend error (fail-open behavior)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value under `key`, labelled with `tags`.
    ///
    /// `ttl_seconds = None` applies the implementation default.
    async fn set(
        &self,
        key: &str,
        value: &str,
        tags: &[&str],
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes every entry labelled with `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::OperationError`] when the backend could not
    /// drop the entries.
    async fn invalidate_tag(&self, tag: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Backend name reported by health checks.
    fn backend(&self) -> &'static str;
}
