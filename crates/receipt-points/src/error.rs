use crate::config::ConfigError;
use crate::receipts::{ReceiptServiceError, StoreError, ValidationError};
use crate::telemetry::TelemetryError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failure surfaced by the binaries and the receipt handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is not valid JSON: {0}")]
    InvalidInput(#[from] serde_json::Error),
    #[error("request body rejected: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("{0}")]
    InvalidReceipt(#[from] ValidationError),
    #[error("{0}")]
    UnknownReceipt(#[from] StoreError),
}

impl From<ReceiptServiceError> for AppError {
    fn from(error: ReceiptServiceError) -> Self {
        match error {
            ReceiptServiceError::Validation(error) => AppError::InvalidReceipt(error),
            ReceiptServiceError::Store(error) => AppError::UnknownReceipt(error),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(_) | AppError::InvalidBody(_) | AppError::InvalidReceipt(_) => {
                let body = Json(json!({ "error": ValidationError::MESSAGE }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::UnknownReceipt(error) => {
                let body = Json(json!({ "error": error.to_string() }));
                (StatusCode::NOT_FOUND, body).into_response()
            }
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                tracing::error!(error = %self, "request failed");
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
