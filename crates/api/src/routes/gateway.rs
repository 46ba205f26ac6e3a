//! The single POST endpoint every operation arrives through.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, routing::post};

use crate::AppState;
use crate::dispatch::{Envelope, dispatch};
use crate::response::ApiResponse;

/// POST / - parse the envelope and dispatch the operation.
///
/// A body that fails to parse (including an unknown operation name) is a 400
/// that never reaches the ledger.
async fn gateway(
    State(state): State<AppState>,
    payload: Result<Json<Envelope>, JsonRejection>,
) -> ApiResponse {
    let Json(envelope) = match payload {
        Ok(p) => p,
        Err(rejection) => return ApiResponse::validation(rejection.body_text()),
    };

    match dispatch(&state, envelope).await {
        Ok(payload) => ApiResponse::ok(payload),
        Err(err) => ApiResponse::from(err),
    }
}

/// Creates the gateway route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(gateway))
}
