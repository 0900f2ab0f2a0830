//! Redis cache shared by every server instance.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

const KEY_PREFIX: &str = "nav:";

/// Document keys popped from a tag set per round trip.
const INVALIDATE_BATCH: usize = 500;

/// Redis cache for rendered sitemap documents.
///
/// Documents live under `nav:<key>`; each tag is a Redis set at
/// `nav:tag:<tag>` listing the document keys labelled with it. A tag set
/// expires together with its newest member, so members outlived by their
/// documents never pile up. Reads and writes fail open. Tag invalidation
/// reports its errors, since a silently skipped invalidation leaves stale
/// sitemaps behind.
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Opens a managed connection and checks it with `PING`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is malformed or the
    /// server does not answer.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::ConnectionError(format!("invalid Redis URL: {e}")))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::ConnectionError(e.to_string()))?;

        conn.ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("PING failed: {e}")))?;

        info!(default_ttl = default_ttl_seconds, "Connected to Redis");

        Ok(Self {
            conn,
            default_ttl: default_ttl_seconds,
        })
    }

    fn document_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    fn tag_key(tag: &str) -> String {
        format!("{KEY_PREFIX}tag:{tag}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        let value = conn
            .get::<_, Option<String>>(Self::document_key(key))
            .await
            .unwrap_or_else(|e| {
                warn!(key, error = %e, "Redis GET failed");
                None
            });

        debug!(key, hit = value.is_some(), "Redis lookup");
        Ok(value)
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        tags: &[&str],
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let document_key = Self::document_key(key);
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        let pipe = store_pipeline(&document_key, value, tags, ttl);

        let mut conn = self.conn.clone();
        if let Err(e) = pipe.query_async::<()>(&mut conn).await {
            warn!(key, error = %e, "Redis SET failed");
        } else {
            debug!(key, ttl, ?tags, "Redis stored document");
        }
        Ok(())
    }

    /// Drains the tag set with `SPOP`, deleting each popped batch of
    /// documents. Every pop is atomic, so a key added concurrently either
    /// lands in a popped batch or stays in the set for a later invalidation.
    async fn invalidate_tag(&self, tag: &str) -> CacheResult<()> {
        let tag_key = Self::tag_key(tag);
        let mut conn = self.conn.clone();
        let mut dropped = 0;

        loop {
            let members: Vec<String> = pop_members(&tag_key)
                .query_async(&mut conn)
                .await
                .map_err(|e| CacheError::OperationError(format!("SPOP {tag_key}: {e}")))?;

            if !members.is_empty() {
                conn.del::<_, ()>(&members)
                    .await
                    .map_err(|e| CacheError::OperationError(format!("DEL {tag_key}: {e}")))?;
                dropped += members.len();
            }

            if members.len() < INVALIDATE_BATCH {
                break;
            }
        }

        info!(tag, entries = dropped, "Redis tag invalidated");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

/// Stores the document and its tag memberships in one transaction and keeps
/// every tag set alive exactly as long as the document just added.
fn store_pipeline(document_key: &str, value: &str, tags: &[&str], ttl: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic().set_ex(document_key, value, ttl).ignore();
    for tag in tags {
        let tag_key = RedisCache::tag_key(tag);
        pipe.sadd(&tag_key, document_key).ignore();
        pipe.expire(&tag_key, ttl as i64).ignore();
    }
    pipe
}

fn pop_members(tag_key: &str) -> redis::Cmd {
    let mut cmd = redis::cmd("SPOP");
    cmd.arg(tag_key).arg(INVALIDATE_BATCH);
    cmd
}
