//! Health check endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// The service name reported by the health probe.
const SERVICE_NAME: &str = "payline";

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Name of the service answering the probe.
    pub service: &'static str,
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler.
///
/// Answers without touching the database, so a wedged pool does not take the
/// probe down with it.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE_NAME,
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_payload_names_the_service() {
        let resp = HealthResponse {
            service: SERVICE_NAME,
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        };

        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["service"], "payline");
        assert_eq!(body["status"], "healthy");
    }
}
