//! Review-related DTOs.

use chrono::{DateTime, Utc};
use emporium_core::validation::{rules, Violations};
use emporium_core::{EmporiumResult, ProductId, Review, ReviewId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to create a new review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub first_name: String,
    pub last_name: String,
    pub review_text: String,
    pub rating: i32,
    pub product_id: i64,
}

impl CreateReviewRequest {
    /// Validates the request fields.
    pub fn validate(&self) -> EmporiumResult<()> {
        let mut violations = Violations::new();
        violations.record(rules::not_blank("first_name", &self.first_name));
        violations.record(rules::not_blank("last_name", &self.last_name));
        violations.record(rules::not_blank("review_text", &self.review_text));
        violations.record(rules::rating_in_range("rating", self.rating));
        violations.record(rules::id_present("product_id", self.product_id));
        violations.into_result()
    }

    /// Returns the referenced product id.
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        ProductId::new(self.product_id)
    }
}

/// Request to update an existing review.
///
/// The owning product cannot be changed after creation, so no product id
/// is accepted here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub first_name: String,
    pub last_name: String,
    pub review_text: String,
    pub rating: i32,
}

impl UpdateReviewRequest {
    /// Validates the request fields.
    pub fn validate(&self) -> EmporiumResult<()> {
        let mut violations = Violations::new();
        violations.record(rules::not_blank("first_name", &self.first_name));
        violations.record(rules::not_blank("last_name", &self.last_name));
        violations.record(rules::not_blank("review_text", &self.review_text));
        violations.record(rules::rating_in_range("rating", self.rating));
        violations.into_result()
    }
}

/// Review response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub first_name: String,
    pub last_name: String,
    pub review_text: String,
    pub rating: i32,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            first_name: review.first_name,
            last_name: review.last_name,
            review_text: review.review_text,
            rating: review.rating,
            product_id: review.product_id,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}
