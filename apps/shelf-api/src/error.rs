//! Error responses for the Shelf API.
//!
//! Every failure leaves the server as `{"code": "...", "message": "..."}`
//! with a status picked from the error's [`ErrorKind`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use shelf_core::ErrorKind;
use shelf_service::ServiceError;
use tracing::error;

/// An HTTP error response.
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    /// Malformed path, query or body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }
}

/// Status and machine-readable code for each error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        ErrorKind::AlreadyExists => (StatusCode::CONFLICT, "already_exists"),
        ErrorKind::KeyMismatch => (StatusCode::CONFLICT, "key_mismatch"),
        ErrorKind::NotPublished => (StatusCode::CONFLICT, "not_published"),
        ErrorKind::UnavailableQuantity => (StatusCode::CONFLICT, "unavailable_quantity"),
        ErrorKind::DateOutOfRange => (StatusCode::UNPROCESSABLE_ENTITY, "date_out_of_range"),
        ErrorKind::InvalidDateFormat => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_date_format"),
        ErrorKind::PriceOutOfRange => (StatusCode::UNPROCESSABLE_ENTITY, "price_out_of_range"),
        ErrorKind::QuantityOutOfRange => {
            (StatusCode::UNPROCESSABLE_ENTITY, "quantity_out_of_range")
        }
        ErrorKind::InvalidInput => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input"),
        ErrorKind::StorageFailure => (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure"),
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let (status, code) = status_for(err.kind());
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }
        ApiError::new(status, code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "code": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
