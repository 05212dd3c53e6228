//! Domain model for the catalog.

pub mod entities;

pub use entities::*;
