//! Product-related DTOs.

use crate::dto::ReviewResponse;
use chrono::{DateTime, Utc};
use emporium_core::validation::{rules, Violations};
use emporium_core::{EmporiumResult, Product, ProductId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl CreateProductRequest {
    /// Validates the request fields.
    pub fn validate(&self) -> EmporiumResult<()> {
        let mut violations = Violations::new();
        violations.record(rules::not_blank("name", &self.name));
        violations.record(rules::positive_price("price", self.price));
        violations.into_result()
    }
}

/// Request to update an existing product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

impl UpdateProductRequest {
    /// Validates the request fields.
    pub fn validate(&self) -> EmporiumResult<()> {
        let mut violations = Violations::new();
        violations.record(rules::not_blank("name", &self.name));
        violations.record(rules::positive_price("price", self.price));
        violations.into_result()
    }
}

/// Product response DTO.
///
/// `average_rating` is normalized on the way out: a stored NaN is reported
/// as 0.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub average_rating: f64,
    pub reviews: Vec<ReviewResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            average_rating: product.normalized_average_rating(),
            name: product.name,
            description: product.description,
            price: product.price,
            reviews: product.reviews.into_iter().map(ReviewResponse::from).collect(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Average rating served by the cached read path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductRatingResponse {
    pub product_id: ProductId,
    pub average_rating: f64,
}

impl ProductRatingResponse {
    /// Creates a rating response.
    #[must_use]
    pub const fn new(product_id: ProductId, average_rating: f64) -> Self {
        Self {
            product_id,
            average_rating,
        }
    }
}
