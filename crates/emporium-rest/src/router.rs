//! Main application router.

use crate::{
    controllers::{health_controller, product_controller, review_controller},
    middleware::{auth_middleware, logging_middleware, AuthState},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{middleware, routing::get, Router};
use emporium_config::ServerConfig;
use emporium_core::HealthCheck;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
///
/// Product and review routes sit behind the bearer-token middleware; health
/// and API docs stay open.
pub fn create_router(
    state: AppState,
    auth: AuthState,
    server_config: &ServerConfig,
    health_checks: Vec<Arc<dyn HealthCheck>>,
) -> Router {
    let cors = create_cors_layer(server_config);

    let api_router = Router::new()
        .nest("/products", product_controller::router())
        .nest("/reviews", review_controller::router())
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    let router = Router::new()
        .merge(health_controller::router(health_checks))
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        if server_config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Emporium Catalog API v1"
}
