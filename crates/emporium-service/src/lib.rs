//! # Emporium Service
//!
//! Business logic for the Emporium catalog: the cache collaborator, the
//! rating aggregator, and the product and review services. Collaborators are
//! passed in explicitly; nothing here reaches for process-wide state.

pub mod cache;
pub mod dto;
pub mod product_service;
pub mod rating_aggregator;
pub mod review_service;

#[cfg(test)]
mod test_support;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use rating_aggregator::*;
pub use review_service::*;
