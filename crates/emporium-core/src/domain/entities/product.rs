//! Product entity.

use crate::{Entity, ProductId, Review};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity representing a catalog item.
///
/// `average_rating` is derived state: the arithmetic mean of the product's
/// review ratings, or 0 when no reviews exist. It is denormalized onto the
/// row and mirrored into the cache, and must never be NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    /// Unique identifier for the product.
    pub id: ProductId,

    /// Product name.
    pub name: String,

    /// Product description.
    pub description: String,

    /// Unit price.
    pub price: f64,

    /// Derived mean of the associated review ratings, 0 with no reviews.
    pub average_rating: f64,

    /// Associated reviews, empty unless eagerly loaded.
    #[serde(default)]
    pub reviews: Vec<Review>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product with no reviews and a zero average rating.
    ///
    /// The id is a placeholder until the store assigns one on insert.
    #[must_use]
    pub fn new(name: String, description: String, price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(0),
            name,
            description,
            price,
            average_rating: 0.0,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the mutable catalog fields.
    pub fn update_details(&mut self, name: String, description: String, price: f64) {
        self.name = name;
        self.description = description;
        self.price = price;
        self.updated_at = Utc::now();
    }

    /// Records a freshly computed average rating.
    pub fn set_average_rating(&mut self, average_rating: f64) {
        self.average_rating = average_rating;
        self.updated_at = Utc::now();
    }

    /// Returns the stored average rating with NaN coerced to 0.
    ///
    /// The aggregator's zero-review guard keeps NaN out of the store; read
    /// paths still re-assert the invariant before handing values out.
    #[must_use]
    pub fn normalized_average_rating(&self) -> f64 {
        if self.average_rating.is_nan() {
            0.0
        } else {
            self.average_rating
        }
    }
}

impl Entity<ProductId> for Product {
    fn id(&self) -> &ProductId {
        &self.id
    }
}
