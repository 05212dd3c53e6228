//! Product service: CRUD plus the cached average-rating read path.

use crate::cache::{cache_keys, Cache};
use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::rating_aggregator::RatingAggregator;
use async_trait::async_trait;
use emporium_core::{EmporiumError, EmporiumResult, Product, ProductId};
use emporium_repository::ProductRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Product service trait.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Creates a new product. The average rating starts at 0.
    async fn create(&self, request: CreateProductRequest) -> EmporiumResult<ProductResponse>;

    /// Returns the product's average rating, served from cache when possible.
    async fn get_average_rating(&self, id: ProductId) -> EmporiumResult<f64>;

    /// Lists all products with their reviews eagerly loaded.
    async fn list(&self) -> EmporiumResult<Vec<ProductResponse>>;

    /// Updates a product's catalog fields. Does not touch the aggregate.
    async fn update(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> EmporiumResult<ProductResponse>;

    /// Deletes a product and its rating cache entry.
    async fn delete(&self, id: ProductId) -> EmporiumResult<()>;
}

/// Product service implementation over explicit collaborators.
pub struct ProductServiceImpl {
    product_repository: Arc<dyn ProductRepository>,
    cache: Arc<dyn Cache>,
    aggregator: Arc<RatingAggregator>,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn Cache>,
        aggregator: Arc<RatingAggregator>,
    ) -> Self {
        Self {
            product_repository,
            cache,
            aggregator,
        }
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn create(&self, request: CreateProductRequest) -> EmporiumResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        request.validate()?;

        let product = Product::new(request.name, request.description, request.price);
        let saved = self.product_repository.create(&product).await?;

        info!("Product created: {}", saved.id);
        Ok(ProductResponse::from(saved))
    }

    async fn get_average_rating(&self, id: ProductId) -> EmporiumResult<f64> {
        debug!("Getting average rating for product {}", id);

        // Read-through: a cache hit answers without touching the store.
        if let Some(cached) = self.aggregator.cached_average(id).await? {
            debug!("Serving average rating for product {} from cache", id);
            return Ok(cached);
        }

        // Miss: confirm the product exists before paying for a recompute.
        self.product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Product", id))?;

        let fresh = self.aggregator.recompute(id).await?;

        // Re-read the cache so the caller observes exactly what recompute
        // wrote, not an interleaved value. With the cache disabled the
        // re-read misses and the recomputed value stands in.
        match self.aggregator.cached_average(id).await? {
            Some(value) => Ok(value),
            None => Ok(fresh),
        }
    }

    async fn list(&self) -> EmporiumResult<Vec<ProductResponse>> {
        debug!("Listing products");

        let products = self.product_repository.find_all_with_reviews().await?;
        // ProductResponse::from re-asserts the no-NaN invariant on the way out.
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    async fn update(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> EmporiumResult<ProductResponse> {
        debug!("Updating product: {}", id);

        request.validate()?;

        let mut product = self
            .product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EmporiumError::not_found("Product", id))?;

        product.update_details(request.name, request.description, request.price);
        let updated = self.product_repository.update(&product).await?;

        info!("Product updated: {}", id);
        Ok(ProductResponse::from(updated))
    }

    async fn delete(&self, id: ProductId) -> EmporiumResult<()> {
        debug!("Deleting product: {}", id);

        let deleted = self.product_repository.delete(id).await?;
        if !deleted {
            return Err(EmporiumError::not_found("Product", id));
        }

        // The row is already gone; a failed cache delete leaves an orphaned
        // rating entry behind and is reported, not compensated.
        self.cache
            .delete(&cache_keys::product_average_rating(id))
            .await?;

        info!("Product deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl").finish_non_exhaustive()
    }
}
