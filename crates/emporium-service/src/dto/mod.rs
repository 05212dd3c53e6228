//! Data transfer objects for the service layer.

mod product_dto;
mod review_dto;

pub use product_dto::*;
pub use review_dto::*;
