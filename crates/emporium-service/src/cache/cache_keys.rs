//! Cache key generators for consistent key naming.

use emporium_core::{ProductId, ReviewId};

/// Generate the cache key holding a product's average rating.
#[must_use]
pub fn product_average_rating(id: ProductId) -> String {
    format!("product:{}:average_rating", id)
}

/// Generate the cache key holding a review's JSON body.
#[must_use]
pub fn review(id: ReviewId) -> String {
    format!("review:{}", id)
}
