//! API error types and HTTP response conversion.
//!
//! Validation and reference failures are user-fixable 400s carrying a
//! structured kind; an absent target id is a 404 with the original `{msg}`
//! body shape; store faults are 500s and the only errors logged here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bujo_core::{Collection, CoreError};
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    ReferenceNotFound(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The 404 outcome for a resource lookup, e.g. `"Task not found"`.
    pub fn not_found(collection: Collection) -> Self {
        Self::NotFound(format!("{} not found", resource_label(collection)))
    }
}

impl From<CoreError> for ApiError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::Validation(err) => Self::Validation(err.to_string()),
            err @ CoreError::ReferenceNotFound { .. } => {
                Self::ReferenceNotFound(err.to_string())
            }
            CoreError::NotFound { collection, .. } => Self::not_found(collection),
            CoreError::Store(err) => Self::Internal(err.to_string()),
            CoreError::Inconsistent(details) => Self::Internal(details.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(message) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "validation_error", "message": message}),
            ),
            Self::ReferenceNotFound(message) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "reference_not_found", "message": message}),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, json!({"msg": message})),
            Self::Internal(message) => {
                log::error!("event=store_fault module=api status=error error={message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "store_fault", "message": message}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn resource_label(collection: Collection) -> &'static str {
    match collection {
        Collection::Tasks => "Task",
        Collection::Projects => "Project",
        Collection::Habits => "Habit",
        Collection::Expenses => "Expense",
    }
}
