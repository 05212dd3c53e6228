//! Health check controller.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use emporium_core::{HealthCheck, HealthStatus};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Health of a single component.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    /// Component name.
    pub name: String,
    /// Component status.
    pub status: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall health status.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Per-component health.
    pub components: Vec<ComponentHealth>,
}

type Checks = Arc<Vec<Arc<dyn HealthCheck>>>;

/// Creates the health router over the registered component checks.
pub fn router(checks: Vec<Arc<dyn HealthCheck>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(Arc::new(checks))
}

/// Health check endpoint. Probes every registered component; any unhealthy
/// component turns the overall status unhealthy and the response into a 503.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "All components are healthy", body = HealthResponse),
        (status = 503, description = "At least one component is unhealthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(checks): State<Checks>) -> impl IntoResponse {
    let mut components = Vec::with_capacity(checks.len());
    let mut healthy = true;

    for check in checks.iter() {
        let status = check.check().await;
        healthy &= status.is_healthy();
        components.push(ComponentHealth {
            name: check.name().to_string(),
            status: match status {
                HealthStatus::Healthy => "healthy".to_string(),
                HealthStatus::Degraded(reason) => format!("degraded: {reason}"),
                HealthStatus::Unhealthy(reason) => format!("unhealthy: {reason}"),
            },
        });
    }

    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        components,
    };

    (code, Json(body))
}
