//! Cache trait for abstracted caching operations.

use async_trait::async_trait;
use emporium_core::EmporiumResult;
use std::time::Duration;

/// Cache abstraction over the shared key-value store.
///
/// A miss is `Ok(None)`, a distinct state from any stored value; errors are
/// reserved for infrastructure failures. String values keep the trait
/// dyn-compatible; typed access layers on top via [`CacheExt`].
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a raw value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> EmporiumResult<Option<String>>;

    /// Set a raw value in the cache. `None` TTL means the entry never expires.
    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> EmporiumResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> EmporiumResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
///
/// Values are stored as JSON strings.
#[async_trait]
pub trait CacheExt: Cache {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> EmporiumResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> EmporiumResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all Cache implementations
impl<T: Cache + ?Sized> CacheExt for T {}
