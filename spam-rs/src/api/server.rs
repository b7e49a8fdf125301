//! API Server - HTTP server for the classification form and REST API

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{self, AppState};
use crate::api::web;
use crate::error::Result;
use crate::spam::SpamScorer;

/// API Server configuration
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(scorer: SpamScorer, addr: String) -> Self {
        let state = Arc::new(AppState { scorer });
        Self { state, addr }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        // CORS configuration
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(web::index_page).post(web::index_submit))
            .route("/health", get(handlers::health))
            .route("/api/classify", post(handlers::classify))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("API server listening on http://{}", self.addr);

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
