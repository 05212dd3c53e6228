//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the Emporium catalog service.
///
/// Every failure a caller can observe maps to one of these variants, so the
/// kinds stay inspectable all the way up to the REST layer.
#[derive(Error, Debug)]
pub enum EmporiumError {
    /// Requested product or review does not exist in the store.
    #[error("{resource_type} with id {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Input failed domain constraints; carries one entry per violated field.
    #[error("validation failed: {}", summarize_violations(.violations))]
    Validation { violations: Vec<FieldViolation> },

    /// Bearer token missing, malformed, or rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Write conflicted with existing state (e.g. unique constraint).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Underlying persistence operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Underlying cache operation failed.
    #[error("cache error: {0}")]
    Cache(String),

    /// The stored or computed average rating is not a valid number.
    /// Unreachable while the zero-review guard holds; treated as an
    /// assertion failure when observed.
    #[error("average rating for product {product_id} is not a valid number")]
    AggregateUnavailable { product_id: crate::ProductId },

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Generic error wrapper.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn summarize_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl EmporiumError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Unauthorized(_) => 401,
            Self::Conflict(_) => 409,
            Self::Database(_)
            | Self::Cache(_)
            | Self::AggregateUnavailable { .. }
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error from accumulated field violations.
    #[must_use]
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for EmporiumError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // 23505 is the PostgreSQL unique-violation code
                if let Some(code) = db_err.code() {
                    if code == "23505" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for EmporiumError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// A single field-level validation failure: which field, which rule, and a
/// human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldViolation {
    /// Field name
    pub field: String,
    /// Machine-readable rule code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl FieldViolation {
    /// Creates a new field violation.
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Serializable error envelope for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// Field-level violations for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl ErrorResponse {
    /// Creates an error response from an [`EmporiumError`].
    #[must_use]
    pub fn from_error(error: &EmporiumError) -> Self {
        let details = match error {
            EmporiumError::Validation { violations } => Some(violations.clone()),
            _ => None,
        };
        Self {
            message: error.to_string(),
            details,
        }
    }
}

impl From<&EmporiumError> for ErrorResponse {
    fn from(error: &EmporiumError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductId;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(EmporiumError::not_found("Product", 1).status_code(), 404);
        assert_eq!(
            EmporiumError::validation(vec![FieldViolation::new("rating", "range", "out of range")])
                .status_code(),
            400
        );
        assert_eq!(EmporiumError::unauthorized("no token").status_code(), 401);
        assert_eq!(EmporiumError::Conflict("duplicate".to_string()).status_code(), 409);
        assert_eq!(EmporiumError::Database("down".to_string()).status_code(), 500);
        assert_eq!(EmporiumError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(
            EmporiumError::AggregateUnavailable {
                product_id: ProductId::new(3)
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = EmporiumError::not_found("Product", 42);
        assert_eq!(err.to_string(), "Product with id 42 not found");
    }

    #[test]
    fn test_validation_display_joins_violations() {
        let err = EmporiumError::validation(vec![
            FieldViolation::new("rating", "range", "must be between 1 and 5"),
            FieldViolation::new("product_id", "required", "is required"),
        ]);
        let text = err.to_string();
        assert!(text.contains("rating: must be between 1 and 5"));
        assert!(text.contains("product_id: is required"));
    }

    #[test]
    fn test_error_response_plain_error_has_no_details() {
        let err = EmporiumError::Database("connection refused".to_string());
        let response = ErrorResponse::from_error(&err);
        assert!(response.message.contains("connection refused"));
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_validation_carries_violations() {
        let err = EmporiumError::validation(vec![FieldViolation::new(
            "price",
            "positive",
            "must be greater than zero",
        )]);
        let response = ErrorResponse::from_error(&err);
        let details = response.details.expect("details should be present");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "price");
        assert_eq!(details[0].code, "positive");
    }

    #[test]
    fn test_error_response_serializes_without_empty_details() {
        let err = EmporiumError::not_found("Review", 1);
        let json = serde_json::to_string(&ErrorResponse::from_error(&err)).unwrap();
        assert!(!json.contains("details"));
        assert!(json.contains("Review with id 1 not found"));
    }
}
