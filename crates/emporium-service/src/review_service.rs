//! Review service: CRUD over reviews, with every mutation triggering a
//! recompute of the owning product's average rating.

use crate::cache::{cache_keys, Cache, CacheExt};
use crate::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::rating_aggregator::RatingAggregator;
use async_trait::async_trait;
use emporium_core::{EmporiumError, EmporiumResult, Review, ReviewId};
use emporium_repository::{ProductRepository, ReviewRepository};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Review service trait.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Creates a new review and recomputes the product's average rating.
    async fn create(&self, request: CreateReviewRequest) -> EmporiumResult<ReviewResponse>;

    /// Gets a review by id, read-through on the review cache entry.
    async fn get(&self, id: ReviewId) -> EmporiumResult<ReviewResponse>;

    /// Updates a review's mutable fields and recomputes the product's
    /// average rating. The owning product cannot change.
    async fn update(
        &self,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> EmporiumResult<ReviewResponse>;

    /// Deletes a review and recomputes the product's average rating.
    async fn delete(&self, id: ReviewId) -> EmporiumResult<()>;
}

/// Review service implementation over explicit collaborators.
pub struct ReviewServiceImpl {
    product_repository: Arc<dyn ProductRepository>,
    review_repository: Arc<dyn ReviewRepository>,
    cache: Arc<dyn Cache>,
    aggregator: Arc<RatingAggregator>,
    ttl: Option<Duration>,
}

impl ReviewServiceImpl {
    /// Creates a new review service.
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        review_repository: Arc<dyn ReviewRepository>,
        cache: Arc<dyn Cache>,
        aggregator: Arc<RatingAggregator>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            product_repository,
            review_repository,
            cache,
            aggregator,
            ttl,
        }
    }
}

#[async_trait]
impl ReviewService for ReviewServiceImpl {
    async fn create(&self, request: CreateReviewRequest) -> EmporiumResult<ReviewResponse> {
        debug!("Creating review for product {}", request.product_id);

        request.validate()?;

        // Referential existence is an application-layer check here.
        let product_id = request.product_id();
        self.product_repository
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Product", product_id))?;

        let review = Review::new(
            request.first_name,
            request.last_name,
            request.review_text,
            request.rating,
            product_id,
        );
        let saved = self.review_repository.create(&review).await?;

        self.cache
            .set(&cache_keys::review(saved.id), &saved, self.ttl)
            .await?;

        // A failure past this point leaves the review persisted and the
        // aggregate stale until the next successful recompute.
        self.aggregator.recompute(product_id).await?;

        info!("Review created: {}", saved.id);
        Ok(ReviewResponse::from(saved))
    }

    async fn get(&self, id: ReviewId) -> EmporiumResult<ReviewResponse> {
        debug!("Getting review: {}", id);

        let key = cache_keys::review(id);
        if let Some(cached) = self.cache.get::<Review>(&key).await? {
            debug!("Serving review {} from cache", id);
            return Ok(ReviewResponse::from(cached));
        }

        let review = self
            .review_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Review", id))?;

        self.cache.set(&key, &review, self.ttl).await?;

        Ok(ReviewResponse::from(review))
    }

    async fn update(
        &self,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> EmporiumResult<ReviewResponse> {
        debug!("Updating review: {}", id);

        request.validate()?;

        let mut review = self
            .review_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Review", id))?;

        review.update_details(
            request.first_name,
            request.last_name,
            request.review_text,
            request.rating,
        );
        let updated = self.review_repository.update(&review).await?;

        self.cache
            .set(&cache_keys::review(id), &updated, self.ttl)
            .await?;

        // Always recompute, even when the rating is unchanged. The redundant
        // work keeps the trigger unconditional and the final state identical.
        self.aggregator.recompute(updated.product_id).await?;

        info!("Review updated: {}", id);
        Ok(ReviewResponse::from(updated))
    }

    async fn delete(&self, id: ReviewId) -> EmporiumResult<()> {
        debug!("Deleting review: {}", id);

        // A missing review returns NotFound without touching the aggregate.
        let review = self
            .review_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Review", id))?;

        self.review_repository.delete(id).await?;
        self.cache.delete(&cache_keys::review(id)).await?;

        self.aggregator.recompute(review.product_id).await?;

        info!("Review deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for ReviewServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewServiceImpl")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
