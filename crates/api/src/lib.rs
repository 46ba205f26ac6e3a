//! HTTP API layer with the single-endpoint dispatcher.
//!
//! This crate provides:
//! - The request envelope and the closed operation table
//! - Ledger operation handlers
//! - The response envelope with its status mapping

pub mod dispatch;
pub mod ops;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use payline_shared::TokenService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Token service for issuing and verifying identity assertions.
    pub tokens: Arc<TokenService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
