//! API route configuration.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit();

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Pets
        .route("/api/v1/pets", post(handlers::register_pet))
        .route("/api/v1/pets/search", post(handlers::search_pets))
        .route("/api/v1/pets/stats", get(handlers::get_registry_stats))
        .route("/api/v1/pets/:position", get(handlers::get_pet))

        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
