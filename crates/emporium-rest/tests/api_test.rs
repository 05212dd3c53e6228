//! Router-level tests: auth matrix, status mapping, and error envelope shape.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use emporium_config::ServerConfig;
use emporium_core::{
    EmporiumError, EmporiumResult, HealthCheck, HealthStatus, Product, ProductId, Review, ReviewId,
};
use emporium_rest::{
    middleware::AuthState,
    router::create_router,
    state::AppState,
};
use emporium_service::{
    CreateProductRequest, CreateReviewRequest, ProductResponse, ProductService, ReviewResponse,
    ReviewService, UpdateProductRequest, UpdateReviewRequest,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

const TOKEN: &str = "secret-token";

/// Canned catalog: product 1 exists with average rating 4.5, review 1 exists
/// against it, everything else is absent.
struct StubCatalog;

fn stub_product() -> Product {
    let mut product = Product::new(
        "Keyboard".to_string(),
        "Tenkeyless".to_string(),
        59.99,
    );
    product.id = ProductId::new(1);
    product.average_rating = 4.5;
    product
}

fn stub_review() -> Review {
    let mut review = Review::new(
        "Jane".to_string(),
        "Doe".to_string(),
        "Solid".to_string(),
        5,
        ProductId::new(1),
    );
    review.id = ReviewId::new(1);
    review
}

#[async_trait]
impl ProductService for StubCatalog {
    async fn create(&self, request: CreateProductRequest) -> EmporiumResult<ProductResponse> {
        request.validate()?;
        Ok(ProductResponse::from(stub_product()))
    }

    async fn get_average_rating(&self, id: ProductId) -> EmporiumResult<f64> {
        if id == ProductId::new(1) {
            Ok(4.5)
        } else {
            Err(EmporiumError::not_found("Product", id))
        }
    }

    async fn list(&self) -> EmporiumResult<Vec<ProductResponse>> {
        Ok(vec![ProductResponse::from(stub_product())])
    }

    async fn update(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> EmporiumResult<ProductResponse> {
        request.validate()?;
        if id == ProductId::new(1) {
            Ok(ProductResponse::from(stub_product()))
        } else {
            Err(EmporiumError::not_found("Product", id))
        }
    }

    async fn delete(&self, id: ProductId) -> EmporiumResult<()> {
        if id == ProductId::new(1) {
            Ok(())
        } else {
            Err(EmporiumError::not_found("Product", id))
        }
    }
}

#[async_trait]
impl ReviewService for StubCatalog {
    async fn create(&self, request: CreateReviewRequest) -> EmporiumResult<ReviewResponse> {
        request.validate()?;
        if request.product_id() == ProductId::new(1) {
            Ok(ReviewResponse::from(stub_review()))
        } else {
            Err(EmporiumError::not_found("Product", request.product_id()))
        }
    }

    async fn get(&self, id: ReviewId) -> EmporiumResult<ReviewResponse> {
        if id == ReviewId::new(1) {
            Ok(ReviewResponse::from(stub_review()))
        } else {
            Err(EmporiumError::not_found("Review", id))
        }
    }

    async fn update(
        &self,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> EmporiumResult<ReviewResponse> {
        request.validate()?;
        if id == ReviewId::new(1) {
            Ok(ReviewResponse::from(stub_review()))
        } else {
            Err(EmporiumError::not_found("Review", id))
        }
    }

    async fn delete(&self, id: ReviewId) -> EmporiumResult<()> {
        if id == ReviewId::new(1) {
            Ok(())
        } else {
            Err(EmporiumError::not_found("Review", id))
        }
    }
}

/// Health probe with a fixed outcome.
struct StubProbe {
    name: &'static str,
    healthy: bool,
}

#[async_trait]
impl HealthCheck for StubProbe {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self) -> HealthStatus {
        if self.healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy("connection refused".to_string())
        }
    }
}

fn app_with_checks(checks: Vec<Arc<dyn HealthCheck>>) -> Router {
    let catalog = Arc::new(StubCatalog);
    create_router(
        AppState::new(catalog.clone(), catalog),
        AuthState::with_token(TOKEN),
        &ServerConfig::default(),
        checks,
    )
}

fn app() -> Router {
    app_with_checks(vec![Arc::new(StubProbe {
        name: "database",
        healthy: true,
    })])
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_needs_no_auth() {
    let response = app().oneshot(get_request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["components"][0]["name"], "database");
    assert_eq!(json["components"][0]["status"], "healthy");
}

#[tokio::test]
async fn test_unhealthy_component_turns_health_into_503() {
    let app = app_with_checks(vec![
        Arc::new(StubProbe {
            name: "database",
            healthy: true,
        }),
        Arc::new(StubProbe {
            name: "cache",
            healthy: false,
        }),
    ]);

    let response = app.oneshot(get_request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["components"][1]["status"], "unhealthy: connection refused");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let response = app()
        .oneshot(get_request("/products/1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("unauthorized"));
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/products/1")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let response = app()
        .oneshot(get_request("/products/1", Some("wrong-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_token_is_unauthorized() {
    let response = app()
        .oneshot(get_request("/products/1", Some("")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_product_rating() {
    let response = app()
        .oneshot(get_request("/products/1", Some(TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["product_id"], 1);
    assert_eq!(json["average_rating"], 4.5);
}

#[tokio::test]
async fn test_missing_product_maps_to_404_envelope() {
    let response = app()
        .oneshot(get_request("/products/404", Some(TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Product with id 404 not found");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_list_products() {
    let response = app()
        .oneshot(get_request("/products", Some(TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Keyboard");
    assert_eq!(json[0]["average_rating"], 4.5);
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/products",
            r#"{"name": "Keyboard", "description": "Tenkeyless", "price": 59.99}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
}

#[tokio::test]
async fn test_invalid_product_maps_to_400_with_details() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/products",
            r#"{"name": "", "price": 0.0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let details = json["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["field"], "name");
    assert_eq!(details[1]["field"], "price");
}

#[tokio::test]
async fn test_delete_product_returns_204() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/products/1")
                .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_create_review_returns_201() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/reviews",
            r#"{"first_name": "Jane", "last_name": "Doe", "review_text": "Solid", "rating": 5, "product_id": 1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["rating"], 5);
    assert_eq!(json["product_id"], 1);
}

#[tokio::test]
async fn test_out_of_range_rating_maps_to_400() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/reviews",
            r#"{"first_name": "Jane", "last_name": "Doe", "review_text": "Bad", "rating": 9, "product_id": 1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "rating");
}

#[tokio::test]
async fn test_get_review() {
    let response = app()
        .oneshot(get_request("/reviews/1", Some(TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["first_name"], "Jane");
}

#[tokio::test]
async fn test_missing_review_maps_to_404() {
    let response = app()
        .oneshot(get_request("/reviews/404", Some(TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_review() {
    let response = app()
        .oneshot(json_request(
            Method::PUT,
            "/reviews/1",
            r#"{"first_name": "Jane", "last_name": "Doe", "review_text": "Changed", "rating": 3}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_review_returns_204() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/reviews/1")
                .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = app()
        .oneshot(get_request("/api-docs/openapi.json", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"].get("/products/{id}").is_some());
}
