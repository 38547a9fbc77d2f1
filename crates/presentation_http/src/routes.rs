//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.allowed_origins))
        .layer(DefaultBodyLimit::max(server.max_audio_body_bytes));

    Router::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        // Voice agent API (v1)
        .route("/v1/agent/chat/{session_id}", post(handlers::agent::chat))
        .route("/v1/agent/query", post(handlers::agent::query))
        .route(
            "/v1/agent/history/{session_id}",
            get(handlers::agent::get_history).delete(handlers::agent::clear_history),
        )
        .layer(middleware)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}
