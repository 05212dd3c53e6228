//! Product catalog controller.

use crate::{
    responses::{created, no_content, ok, AppError, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use emporium_core::ProductId;
use emporium_service::{
    CreateProductRequest, ProductRatingResponse, ProductResponse, UpdateProductRequest,
};
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product_rating)
                .put(update_product)
                .delete(delete_product),
        )
}

/// Create a new product.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failed", body = emporium_core::ErrorResponse),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    debug!("Create product request: {}", request.name);

    let response = state.product_service.create(request).await?;
    Ok(created(response))
}

/// List all products with their reviews.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<ProductResponse>> {
    debug!("List products request");

    let response = state.product_service.list().await?;
    ok(response)
}

/// Get a product's average rating, served from cache when current.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product average rating", body = ProductRatingResponse),
        (status = 404, description = "Product not found", body = emporium_core::ErrorResponse),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_product_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ProductRatingResponse> {
    debug!("Get product rating request: {}", id);

    let product_id = ProductId::new(id);
    let average_rating = state.product_service.get_average_rating(product_id).await?;
    ok(ProductRatingResponse::new(product_id, average_rating))
}

/// Update a product's catalog fields.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation failed", body = emporium_core::ErrorResponse),
        (status = 404, description = "Product not found", body = emporium_core::ErrorResponse),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<ProductResponse> {
    debug!("Update product request: {}", id);

    let response = state
        .product_service
        .update(ProductId::new(id), request)
        .await?;
    ok(response)
}

/// Delete a product and its rating cache entry.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = emporium_core::ErrorResponse),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);

    state.product_service.delete(ProductId::new(id)).await?;
    Ok(no_content())
}
