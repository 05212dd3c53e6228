//! Application state for Axum handlers.

use emporium_service::{ProductService, ReviewService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub review_service: Arc<dyn ReviewService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        product_service: Arc<dyn ProductService>,
        review_service: Arc<dyn ReviewService>,
    ) -> Self {
        Self {
            product_service,
            review_service,
        }
    }
}
