//! # Emporium REST
//!
//! REST API layer using Axum for the Emporium catalog service. Maps HTTP
//! verbs onto the product and review services, guards mutating routes with a
//! static bearer token, and serves Swagger UI for the API surface.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
