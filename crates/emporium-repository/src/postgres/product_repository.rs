//! PostgreSQL product repository implementation.

use super::review_repository::ReviewRow;
use crate::{traits::ProductRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emporium_core::{EmporiumError, EmporiumResult, Product, ProductId, Review};
use sqlx::FromRow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL product repository implementation.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: Arc<DatabasePool>,
}

impl PostgresProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    average_rating: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            average_rating: row.average_rating,
            reviews: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &Product) -> EmporiumResult<Product> {
        debug!("Inserting product: {}", product.name);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, description, price, average_rating,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, price, average_rating,
                      created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.average_rating)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, average_rating,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_all_with_reviews(&self) -> EmporiumResult<Vec<Product>> {
        debug!("Finding all products with reviews");

        let product_rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, average_rating,
                   created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        let review_rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, first_name, last_name, review_text, rating,
                   product_id, created_at, updated_at
            FROM reviews
            ORDER BY product_id, id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        let mut reviews_by_product: HashMap<i64, Vec<Review>> = HashMap::new();
        for row in review_rows {
            reviews_by_product
                .entry(row.product_id)
                .or_default()
                .push(row.into());
        }

        let products = product_rows
            .into_iter()
            .map(|row| {
                let mut product = Product::from(row);
                product.reviews = reviews_by_product
                    .remove(&product.id.into_inner())
                    .unwrap_or_default();
                product
            })
            .collect();

        Ok(products)
    }

    async fn update(&self, product: &Product) -> EmporiumResult<Product> {
        debug!("Updating product: {}", product.id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3,
                average_rating = $4, updated_at = $5
            WHERE id = $6
            RETURNING id, name, description, price, average_rating,
                      created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.average_rating)
        .bind(product.updated_at)
        .bind(product.id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Product::from)
            .ok_or_else(|| EmporiumError::not_found("Product", product.id))
    }

    async fn delete(&self, id: ProductId) -> EmporiumResult<bool> {
        debug!("Deleting product: {}", id);

        // Review rows cascade via the foreign key
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
