//! Route definitions for the Vitrine API.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the admin console may be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/config",
            get(handlers::get_config).post(handlers::save_config),
        )
        .route(
            "/profiles",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route("/upload", post(handlers::upload))
        .route("/debug/env", get(handlers::debug_env))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
