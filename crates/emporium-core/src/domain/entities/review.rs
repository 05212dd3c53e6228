//! Review entity.

use crate::{Entity, ProductId, ReviewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review entity: a rating and write-up left against a product.
///
/// `product_id` is set at creation and never changes afterwards. Referential
/// existence of the product is checked by the review service, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Review {
    /// Unique identifier for the review.
    pub id: ReviewId,

    /// Reviewer's first name.
    pub first_name: String,

    /// Reviewer's last name.
    pub last_name: String,

    /// Free-form review text.
    pub review_text: String,

    /// Rating on a 1 to 5 scale.
    pub rating: i32,

    /// Owning product.
    pub product_id: ProductId,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new review against the given product.
    ///
    /// The id is a placeholder until the store assigns one on insert.
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        review_text: String,
        rating: i32,
        product_id: ProductId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ReviewId::new(0),
            first_name,
            last_name,
            review_text,
            rating,
            product_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the mutable fields. `product_id` stays untouched.
    pub fn update_details(
        &mut self,
        first_name: String,
        last_name: String,
        review_text: String,
        rating: i32,
    ) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.review_text = review_text;
        self.rating = rating;
        self.updated_at = Utc::now();
    }

    /// Returns the reviewer's full name.
    #[must_use]
    pub fn reviewer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity<ReviewId> for Review {
    fn id(&self) -> &ReviewId {
        &self.id
    }
}
