//! REST API over the opportunity evaluator.
//!
//! Provides two endpoints:
//! - `POST /evaluate` accepts a client profile plus parameters and
//!   returns the four opportunity rows and the recommendation
//! - `GET /assumptions` returns the active cost assumptions

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::CostAssumptions;

/// Immutable application state shared across all request handlers.
///
/// Holds only the cost assumptions; evaluation itself is pure, so no
/// locks are needed and requests may run concurrently.
pub struct AppState {
    /// Cost assumptions applied to every evaluation request.
    pub assumptions: CostAssumptions,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/evaluate", post(handlers::post_evaluate))
        .route("/assumptions", get(handlers::get_assumptions))
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
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
