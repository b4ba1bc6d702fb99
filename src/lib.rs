pub mod client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

use axum::Router;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use repository::EventRepository;

// Shared state for every request
pub struct AppState {
    pub events: Arc<dyn EventRepository>,
}

impl AppState {
    pub fn new(events: Arc<dyn EventRepository>) -> Arc<Self> {
        Arc::new(Self { events })
    }
}

/// The complete HTTP application: welcome, health and the events routes
/// under `mount_path`, with open CORS and request tracing.
pub fn build_router(state: Arc<AppState>, mount_path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(controllers::routes(mount_path))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
