pub mod events;

use axum::{routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;

pub fn routes(mount_path: &str) -> Router<Arc<crate::AppState>> {
    let welcome = json!({
        "message": "Bem-vindo à API de Eventos SATA",
        "endpoints": { "eventos": mount_path }
    });

    Router::new()
        .route("/", get(move || async move { Json(welcome) }))
        .route("/health", get(|| async { "OK" }))
        .merge(events::routes(mount_path))
}
