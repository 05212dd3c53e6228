//! Redis-based cache implementation.

use super::Cache;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use emporium_core::{EmporiumError, EmporiumResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Redis-based cache service.
pub struct RedisCache {
    /// Redis connection pool, `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCache {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> EmporiumResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| EmporiumError::Cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(EmporiumError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl Cache for RedisCache {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> EmporiumResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| EmporiumError::Cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> EmporiumResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;

        match ttl {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, ttl_secs)
                    .await
                    .map_err(|e| {
                        EmporiumError::Cache(format!("Failed to set key '{}': {}", key, e))
                    })?;
                debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
            }
            None => {
                conn.set::<_, _, ()>(key, value).await.map_err(|e| {
                    EmporiumError::Cache(format!("Failed to set key '{}': {}", key, e))
                })?;
                debug!("Cached key '{}' without expiry", key);
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> EmporiumResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| EmporiumError::Cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_cache_is_inert() {
        let cache = RedisCache::disabled();
        assert!(!cache.is_enabled());

        // Reads always miss, writes and deletes are no-ops
        assert_eq!(cache.get_raw("product:1:average_rating").await.unwrap(), None);
        cache
            .set_raw("product:1:average_rating", "4.5", None)
            .await
            .unwrap();
        assert!(!cache.delete("product:1:average_rating").await.unwrap());
    }
}
