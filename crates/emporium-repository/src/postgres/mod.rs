//! PostgreSQL repository implementations.

mod product_repository;
mod review_repository;

pub use product_repository::PostgresProductRepository;
pub use review_repository::PostgresReviewRepository;
