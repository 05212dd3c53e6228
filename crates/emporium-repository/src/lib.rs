//! # Emporium Repository
//!
//! Data access for the catalog: repository traits over products and reviews,
//! their PostgreSQL implementations, and the shared connection pool.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository> / Arc<dyn ReviewRepository>
//! PostgresProductRepository / PostgresReviewRepository
//!   ↓
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
