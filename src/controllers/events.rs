use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{Event, EventInput};
use crate::validation::validate_event;
use crate::AppState;

pub fn routes(mount_path: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(mount_path, get(list_events).post(create_event))
        .route(
            &format!("{}/{{id}}", mount_path),
            get(get_event).put(update_event).delete(delete_event),
        )
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub filtro: Option<String>,
}

fn event_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::BadRequest("Identificador de evento inválido".to_string()))
}

fn event_body(body: Result<Json<EventInput>, JsonRejection>) -> Result<EventInput, ApiError> {
    let Json(input) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    validate_event(&input).map_err(ApiError::BadRequest)?;
    Ok(input)
}

// GET <mount>?filtro=text
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsQuery>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state
        .events
        .list(params.filtro.as_deref())
        .await
        .map_err(ApiError::store("Erro ao buscar eventos"))?;
    Ok(Json(events))
}

// GET <mount>/{id}
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Event>, ApiError> {
    let id = event_id(path)?;
    state
        .events
        .get_by_id(id)
        .await
        .map_err(ApiError::store("Erro ao buscar evento"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Evento não encontrado"))
}

// POST <mount>
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EventInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let input = event_body(body)?;
    let id = state
        .events
        .create(&input)
        .await
        .map_err(ApiError::store("Erro ao inserir evento"))?;
    Ok((StatusCode::CREATED, Json(input.into_event(id))))
}

// PUT <mount>/{id}
//
// Echoes the submitted fields without re-reading the row, so an id with no
// matching row still answers 200.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<EventInput>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let id = event_id(path)?;
    let input = event_body(body)?;
    state
        .events
        .update_by_id(id, &input)
        .await
        .map_err(ApiError::store("Erro ao atualizar evento"))?;
    Ok(Json(input.into_event(id)))
}

// DELETE <mount>/{id}
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = event_id(path)?;
    state
        .events
        .delete_by_id(id)
        .await
        .map_err(ApiError::store("Erro ao excluir evento"))?;
    Ok(StatusCode::NO_CONTENT)
}
