//! The response envelope every operation returns.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use payline_shared::AppError;

/// Uniform `{code, message, payload}` envelope. The HTTP status mirrors
/// `code`.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    /// Status code, also used as the HTTP status.
    pub code: u16,
    /// Human-readable outcome.
    pub message: String,
    /// Operation payload: object, array, or string.
    pub payload: Value,
}

impl ApiResponse {
    /// A successful response.
    #[must_use]
    pub fn ok(payload: Value) -> Self {
        Self {
            code: 200,
            message: "OK".to_string(),
            payload,
        }
    }

    /// A request that failed validation before reaching the ledger.
    #[must_use]
    pub fn validation(message: String) -> Self {
        Self {
            code: 400,
            message,
            payload: json!({}),
        }
    }
}

impl From<AppError> for ApiResponse {
    fn from(err: AppError) -> Self {
        if err.status_code() >= 500 {
            error!(error = %err, "operation failed");
        }
        Self {
            code: err.status_code(),
            message: err.public_message(),
            payload: json!({}),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
