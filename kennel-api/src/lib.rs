//! # Kennel API Server
//!
//! HTTP/JSON front of the Kennel pet registry.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/pets` - Register a pet
//! - `POST /api/v1/pets/search` - Search pets by name, gender, age or breed
//! - `GET /api/v1/pets/:position` - Fetch a pet by insertion position
//! - `GET /api/v1/pets/stats` - Registry statistics
//! - `GET /health` - Liveness check
//!
//! ## Example
//!
//! ```rust,ignore
//! use kennel_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let server = ApiServer::new(config);
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod service;
mod state;

pub use dto::{
    HealthResponse, PetDto, RegisterRequest, RegisterResponse, RegistryStatsResponse,
    SearchRequest, SearchResponse,
};
pub use error::ApiError;
pub use routes::create_router;
pub use service::PetService;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for Kennel.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Kennel API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
