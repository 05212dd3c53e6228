//! PostgreSQL review repository implementation.

use crate::{traits::ReviewRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emporium_core::{EmporiumError, EmporiumResult, ProductId, Review, ReviewId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL review repository implementation.
#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: Arc<DatabasePool>,
}

impl PostgresReviewRepository {
    /// Creates a new PostgreSQL review repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a review.
#[derive(Debug, FromRow)]
pub(crate) struct ReviewRow {
    pub(crate) id: i64,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) review_text: String,
    pub(crate) rating: i32,
    pub(crate) product_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            review_text: row.review_text,
            rating: row.rating,
            product_id: ProductId::new(row.product_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: &Review) -> EmporiumResult<Review> {
        debug!("Inserting review for product: {}", review.product_id);

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (first_name, last_name, review_text, rating,
                                 product_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, first_name, last_name, review_text, rating,
                      product_id, created_at, updated_at
            "#,
        )
        .bind(&review.first_name)
        .bind(&review.last_name)
        .bind(&review.review_text)
        .bind(review.rating)
        .bind(review.product_id.into_inner())
        .bind(review.created_at)
        .bind(review.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: ReviewId) -> EmporiumResult<Option<Review>> {
        debug!("Finding review by id: {}", id);

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, first_name, last_name, review_text, rating,
                   product_id, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Review::from))
    }

    async fn find_by_product_id(&self, product_id: ProductId) -> EmporiumResult<Vec<Review>> {
        debug!("Finding reviews for product: {}", product_id);

        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, first_name, last_name, review_text, rating,
                   product_id, created_at, updated_at
            FROM reviews
            WHERE product_id = $1
            ORDER BY id
            "#,
        )
        .bind(product_id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn update(&self, review: &Review) -> EmporiumResult<Review> {
        debug!("Updating review: {}", review.id);

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            UPDATE reviews
            SET first_name = $1, last_name = $2, review_text = $3,
                rating = $4, updated_at = $5
            WHERE id = $6
            RETURNING id, first_name, last_name, review_text, rating,
                      product_id, created_at, updated_at
            "#,
        )
        .bind(&review.first_name)
        .bind(&review.last_name)
        .bind(&review.review_text)
        .bind(review.rating)
        .bind(review.updated_at)
        .bind(review.id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Review::from)
            .ok_or_else(|| EmporiumError::not_found("Review", review.id))
    }

    async fn delete(&self, id: ReviewId) -> EmporiumResult<bool> {
        debug!("Deleting review: {}", id);

        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
