//! Repository trait definitions.

use async_trait::async_trait;
use emporium_core::{EmporiumResult, Product, ProductId, Review, ReviewId};

/// Product repository trait.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new product and returns it with its store-assigned id.
    async fn create(&self, product: &Product) -> EmporiumResult<Product>;

    /// Finds a product by id, without its reviews.
    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>>;

    /// Finds all products with their reviews eagerly loaded, ordered by id.
    async fn find_all_with_reviews(&self) -> EmporiumResult<Vec<Product>>;

    /// Persists the product's current field values, including the
    /// denormalized average rating.
    async fn update(&self, product: &Product) -> EmporiumResult<Product>;

    /// Deletes a product by id. Returns false when no row existed.
    async fn delete(&self, id: ProductId) -> EmporiumResult<bool>;
}

/// Review repository trait.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts a new review and returns it with its store-assigned id.
    async fn create(&self, review: &Review) -> EmporiumResult<Review>;

    /// Finds a review by id.
    async fn find_by_id(&self, id: ReviewId) -> EmporiumResult<Option<Review>>;

    /// Finds all reviews for a product, ordered by id.
    async fn find_by_product_id(&self, product_id: ProductId) -> EmporiumResult<Vec<Review>>;

    /// Persists the review's current field values.
    async fn update(&self, review: &Review) -> EmporiumResult<Review>;

    /// Deletes a review by id. Returns false when no row existed.
    async fn delete(&self, id: ReviewId) -> EmporiumResult<bool>;
}
