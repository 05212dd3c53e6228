//! Caching layer: the cache trait, key builders, and the Redis backend.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{Cache, CacheExt};
pub use redis_cache::RedisCache;
