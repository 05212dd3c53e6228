//! REST controllers.

pub mod health_controller;
pub mod product_controller;
pub mod review_controller;
