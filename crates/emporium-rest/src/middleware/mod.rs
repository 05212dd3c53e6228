//! HTTP middleware: bearer-token auth and request logging.

mod auth;
mod logging;

pub use auth::{auth_middleware, AuthState};
pub use logging::logging_middleware;
