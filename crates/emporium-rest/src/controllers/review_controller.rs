//! Review controller.

use crate::{
    responses::{created, no_content, ok, AppError, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use emporium_core::ReviewId;
use emporium_service::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use tracing::debug;

/// Creates the review router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route(
            "/:id",
            get(get_review).put(update_review).delete(delete_review),
        )
}

/// Create a new review. The owning product's average rating is recomputed
/// before the call returns.
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Validation failed", body = emporium_core::ErrorResponse),
        (status = 404, description = "Referenced product not found", body = emporium_core::ErrorResponse),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    debug!("Create review request for product {}", request.product_id);

    let response = state.review_service.create(request).await?;
    Ok(created(response))
}

/// Get a review by id.
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "The review", body = ReviewResponse),
        (status = 404, description = "Review not found", body = emporium_core::ErrorResponse),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ReviewResponse> {
    debug!("Get review request: {}", id);

    let response = state.review_service.get(ReviewId::new(id)).await?;
    ok(response)
}

/// Update a review's mutable fields. The owning product cannot change; its
/// average rating is recomputed before the call returns.
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review id")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "Validation failed", body = emporium_core::ErrorResponse),
        (status = 404, description = "Review not found", body = emporium_core::ErrorResponse),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateReviewRequest>,
) -> ApiResult<ReviewResponse> {
    debug!("Update review request: {}", id);

    let response = state
        .review_service
        .update(ReviewId::new(id), request)
        .await?;
    ok(response)
}

/// Delete a review and recompute the owning product's average rating.
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found", body = emporium_core::ErrorResponse),
        (status = 401, description = "Missing or invalid API token", body = emporium_core::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete review request: {}", id);

    state.review_service.delete(ReviewId::new(id)).await?;
    Ok(no_content())
}
