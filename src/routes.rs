// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{self, markdown, pagination},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (markdown, pagination).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (config, renderer).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let markdown_routes = Router::new().route("/preview", post(markdown::preview));

    Router::new()
        .nest("/api/markdown", markdown_routes)
        .route("/api/pagination", get(pagination::page_settings))
        .fallback(handlers::not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
