use crate::models::ErrorResponse;
use crate::period::Period;
use axum::{http::StatusCode, Json};
use chrono::Utc;
use std::any::Any;
use tracing::error;

pub const FETCH_FAILED: &str = "Failed to fetch order count from Shopify API";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub allowed_periods: Option<Vec<&'static str>>,
}

impl AppError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            allowed_periods: None,
        }
    }

    pub fn invalid_period() -> Self {
        Self {
            allowed_periods: Some(Period::allowed()),
            ..Self::new(StatusCode::BAD_REQUEST, "Invalid period parameter")
        }
    }

    /// Upstream failures of any kind share one opaque message.
    pub fn fetch_failed() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Endpoint not found")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            success: false,
            error: self.message,
            allowed_periods: self.allowed_periods,
            timestamp: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Converts a handler panic into the JSON 500 envelope.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    use axum::response::IntoResponse;

    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "internal server error");
    AppError::internal().into_response()
}
