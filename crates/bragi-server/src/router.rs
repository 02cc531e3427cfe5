//! Route table and server entry point.

use axum::Router;
use axum::routing::{get, post};
use bragi_core::api::{SAVE_PATH, SCENARIOS_PATH};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{list_scenarios_handler, save_scenario_handler};
use crate::state::AppState;

/// Builds the router serving both scenario endpoints.
///
/// CORS is permissive so the browser client can call the API from any origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(SCENARIOS_PATH, get(list_scenarios_handler))
        .route(SAVE_PATH, post(save_scenario_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `listener` until the process stops.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, build_router(state)).await
}
