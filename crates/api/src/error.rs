//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Client errors are answered with a JSON problem body:
//!
//! ```json
//! {
//!   "title": "A new wishList cannot already have an ID",
//!   "status": 400,
//!   "entityName": "wishList",
//!   "errorKey": "idexists",
//!   "message": "error.idexists"
//! }
//! ```
//!
//! The failure alert headers need the configured application name, so the
//! response only carries a [`FailureAlert`] extension here; the
//! `failure_alert` middleware turns it into headers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use online_shop_core::validation::{Validate, Violation};

use crate::db::RepositoryError;

/// Error key for a malformed request, matching the generic HTTP 400 message.
pub const MALFORMED_REQUEST_KEY: &str = "http.400";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// The request was rejected for a reason identified by an error key.
    #[error("Bad request: {title}")]
    BadRequest {
        /// Human-readable reason.
        title: String,
        /// Entity the request was about.
        entity_name: &'static str,
        /// Machine-readable reason (`idexists`, `idnull`, ...).
        error_key: &'static str,
    },

    /// The transfer object violates field constraints.
    #[error("Validation failed for {object_name}: {} violation(s)", violations.len())]
    Validation {
        entity_name: &'static str,
        object_name: &'static str,
        violations: Vec<Violation>,
    },

    /// Resource not found.
    #[error("Not found")]
    NotFound,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// A bad request for `entity_name`, identified by `error_key`.
    pub fn bad_request(
        entity_name: &'static str,
        error_key: &'static str,
        title: impl Into<String>,
    ) -> Self {
        Self::BadRequest {
            title: title.into(),
            entity_name,
            error_key,
        }
    }

    /// Validate `dto`, failing with every violated constraint.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if any constraint is violated.
    pub fn check<D: Validate>(entity_name: &'static str, dto: &D) -> Result<()> {
        let violations = dto.validate();
        if violations.is_empty() {
            return Ok(());
        }
        Err(Self::Validation {
            entity_name,
            object_name: D::OBJECT_NAME,
            violations,
        })
    }
}

/// Entity name and error key of a rejected request, attached to the
/// response as an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureAlert {
    pub entity_name: &'static str,
    pub error_key: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem {
    title: String,
    status: u16,
    entity_name: &'static str,
    error_key: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldError {
    object_name: &'static str,
    field: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Database(_) | Self::Internal(_) => {
                // Capture server errors to Sentry
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
                // Don't expose internal error details to clients
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::BadRequest {
                title,
                entity_name,
                error_key,
            } => problem(title, entity_name, error_key, Vec::new()),
            Self::Validation {
                entity_name,
                object_name,
                violations,
            } => {
                let field_errors = violations
                    .into_iter()
                    .map(|v| FieldError {
                        object_name,
                        field: v.field,
                        message: v.constraint.to_string(),
                    })
                    .collect();
                problem(
                    "Method argument not valid".to_string(),
                    entity_name,
                    "validation",
                    field_errors,
                )
            }
        }
    }
}

fn problem(
    title: String,
    entity_name: &'static str,
    error_key: &'static str,
    field_errors: Vec<FieldError>,
) -> Response {
    tracing::debug!(entity_name, error_key, %title, "Bad request");

    let body = Problem {
        title,
        status: StatusCode::BAD_REQUEST.as_u16(),
        entity_name,
        error_key,
        message: format!("error.{error_key}"),
        field_errors,
    };
    let mut response = (StatusCode::BAD_REQUEST, Json(body)).into_response();
    response.extensions_mut().insert(FailureAlert {
        entity_name,
        error_key,
    });
    response
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
