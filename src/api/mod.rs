//! REST service for the project collection.
//!
//! Serves the `/api/v1` contract the dashboard's provider consumes:
//! - `GET /api/v1/projects` — full project list
//! - `POST /api/v1/projects` — create a project, returns it with its id

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::provider::MemoryStore;

/// Application state shared across all request handlers.
///
/// The store is internally synchronized, so a plain `Arc` suffices.
pub struct AppState {
    /// Backing project store.
    pub store: MemoryStore,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/v1/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    log::info!("project API listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
