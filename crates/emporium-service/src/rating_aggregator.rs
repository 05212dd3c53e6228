//! Derived average-rating maintenance.
//!
//! The aggregator is the single writer of the denormalized
//! `average_rating` column and its cache entry. Every review mutation funnels
//! through [`RatingAggregator::recompute`]; reads consult
//! [`RatingAggregator::cached_average`] first and only fall back to a
//! recompute on a miss.

use crate::cache::{cache_keys, Cache};
use emporium_core::{EmporiumError, EmporiumResult, ProductId};
use emporium_repository::{ProductRepository, ReviewRepository};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Recomputes a product's average rating and keeps store and cache in step.
///
/// The store write and the cache write are not transactional: either can fail
/// after the other succeeded, and no rollback is attempted. Callers tolerate
/// the resulting window where the two disagree; the cache entry expires and
/// the next recompute converges.
pub struct RatingAggregator {
    product_repository: Arc<dyn ProductRepository>,
    review_repository: Arc<dyn ReviewRepository>,
    cache: Arc<dyn Cache>,
    ttl: Option<Duration>,
}

impl RatingAggregator {
    /// Creates a new aggregator over the given collaborators.
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        review_repository: Arc<dyn ReviewRepository>,
        cache: Arc<dyn Cache>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            product_repository,
            review_repository,
            cache,
            ttl,
        }
    }

    /// Recomputes the average rating for a product from its current review
    /// set, persists it, and writes the same value to the cache.
    ///
    /// Returns the freshly computed value. An empty review set averages to 0.
    pub async fn recompute(&self, product_id: ProductId) -> EmporiumResult<f64> {
        debug!("Recomputing average rating for product {}", product_id);

        let mut product = self
            .product_repository
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Product", product_id))?;

        let reviews = self
            .review_repository
            .find_by_product_id(product_id)
            .await?;

        // Zero-review guard: never divide by zero, never produce NaN.
        let average = if reviews.is_empty() {
            0.0
        } else {
            let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
            sum as f64 / reviews.len() as f64
        };

        product.set_average_rating(average);
        self.product_repository.update(&product).await?;

        self.cache
            .set_raw(
                &cache_keys::product_average_rating(product_id),
                &average.to_string(),
                self.ttl,
            )
            .await?;

        info!(
            "Average rating for product {} recomputed to {}",
            product_id, average
        );
        Ok(average)
    }

    /// Reads the cached average rating for a product.
    ///
    /// A cache miss is `Ok(None)`; only infrastructure failures surface as
    /// errors. A cached value that does not parse to a finite number means
    /// the zero-review guard was bypassed somewhere and is reported as
    /// [`EmporiumError::AggregateUnavailable`].
    pub async fn cached_average(&self, product_id: ProductId) -> EmporiumResult<Option<f64>> {
        let key = cache_keys::product_average_rating(product_id);

        let Some(raw) = self.cache.get_raw(&key).await? else {
            return Ok(None);
        };

        let value: f64 = raw
            .parse()
            .map_err(|_| EmporiumError::AggregateUnavailable { product_id })?;
        if value.is_nan() {
            return Err(EmporiumError::AggregateUnavailable { product_id });
        }

        Ok(Some(value))
    }
}

impl std::fmt::Debug for RatingAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingAggregator")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
