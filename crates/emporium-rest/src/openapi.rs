//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{ComponentHealth, HealthResponse};
use emporium_core::{ErrorResponse, FieldViolation, ProductId, ReviewId};
use emporium_service::{
    CreateProductRequest, CreateReviewRequest, ProductRatingResponse, ProductResponse,
    ReviewResponse, UpdateProductRequest, UpdateReviewRequest,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Emporium catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Emporium Catalog API",
        version = "1.0.0",
        description = "Products and reviews with a cached average-rating aggregate",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::get_product_rating,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        crate::controllers::review_controller::create_review,
        crate::controllers::review_controller::get_review,
        crate::controllers::review_controller::update_review,
        crate::controllers::review_controller::delete_review,
        crate::controllers::health_controller::health_check,
    ),
    components(
        schemas(
            ProductId,
            ReviewId,
            ErrorResponse,
            FieldViolation,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            ProductRatingResponse,
            CreateReviewRequest,
            UpdateReviewRequest,
            ReviewResponse,
            HealthResponse,
            ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "reviews", description = "Review endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for the static bearer token.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Static API token"))
                        .build(),
                ),
            );
        }
    }
}
