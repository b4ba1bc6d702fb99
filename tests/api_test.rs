use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sata_events::{
    build_router,
    error::{StoreError, StoreResult},
    models::{Event, EventInput},
    repository::{EventRepository, MemoryEventRepository},
    AppState,
};

const MOUNT: &str = "/eventos";

fn app_with(repo: Arc<dyn EventRepository>) -> Router {
    build_router(AppState::new(repo), MOUNT)
}

fn app() -> Router {
    app_with(Arc::new(MemoryEventRepository::new()))
}

/// Every operation fails, as if the database were unreachable.
struct FailingRepository;

#[async_trait]
impl EventRepository for FailingRepository {
    async fn list(&self, _filter: Option<&str>) -> StoreResult<Vec<Event>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn get_by_id(&self, _id: i64) -> StoreResult<Option<Event>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn create(&self, _input: &EventInput) -> StoreResult<i64> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn update_by_id(&self, _id: i64, _input: &EventInput) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn delete_by_id(&self, _id: i64) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

fn full_event() -> Value {
    json!({
        "title": "Festa de Encerramento",
        "start": "2025-12-12T22:00:00.000Z",
        "end": "2025-12-13T02:00:00.000Z",
        "color": "#f39c12",
        "location": "Salão principal",
        "description": "Confraternização de fim de ano",
        "notify": true,
        "notifyTime": 120,
        "type": "Celebração"
    })
}

#[tokio::test]
async fn welcome_lists_the_events_mount() {
    let (status, body) = send(&app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bem-vindo à API de Eventos SATA");
    assert_eq!(body["endpoints"]["eventos"], MOUNT);
}

#[tokio::test]
async fn health_check() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn post_then_list_shows_event_once() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/eventos", Some(full_event())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("generated id");

    let mut expected = full_event();
    expected["id"] = json!(id);
    assert_eq!(created, expected);

    let (status, list) = send(&app, Method::GET, "/eventos", None).await;
    assert_eq!(status, StatusCode::OK);
    let matching: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["id"] == json!(id))
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0], &expected);
}

#[tokio::test]
async fn get_by_id_returns_stored_event() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/eventos", Some(full_event())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/eventos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn get_missing_event_is_404() {
    let (status, body) = send(&app(), Method::GET, "/eventos/99999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Evento não encontrado" }));
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let (status, body) = send(&app(), Method::GET, "/eventos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn non_numeric_id_is_400_on_writes() {
    let app = app();

    let (status, body) = send(&app, Method::PUT, "/eventos/abc", Some(full_event())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Identificador de evento inválido");

    let (status, body) = send(&app, Method::DELETE, "/eventos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Identificador de evento inválido");

    // nothing was written through the rejected PUT
    let (_, listed) = send(&app, Method::GET, "/eventos", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn empty_title_is_rejected() {
    let payload = json!({ "title": "", "start": "2025-01-01", "end": "2025-01-02" });
    let (status, body) = send(&app(), Method::POST, "/eventos", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Campo obrigatório ausente ou inválido: title");
}

#[tokio::test]
async fn long_description_is_rejected() {
    let mut payload = full_event();
    payload["description"] = json!("x".repeat(501));
    let (status, body) = send(&app(), Method::POST, "/eventos", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Descrição muito longa (máximo 500 caracteres).");
}

#[tokio::test]
async fn malformed_json_is_400_with_error_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/eventos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn filter_narrows_the_list() {
    let app = app();
    for (title, kind) in [("Aula de violão", "Educativo"), ("Churrasco", "Social"), ("Bingo", "social")] {
        let payload = json!({ "title": title, "start": "2025-05-01", "end": "2025-05-01", "type": kind });
        send(&app, Method::POST, "/eventos", Some(payload)).await;
    }

    let (status, list) = send(&app, Method::GET, "/eventos?filtro=SOCIAL", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = list.as_array().unwrap().iter().map(|e| e["title"].clone()).collect();
    assert_eq!(titles, vec![json!("Churrasco"), json!("Bingo")]);

    let (_, all) = send(&app, Method::GET, "/eventos", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn update_echoes_path_id_and_submitted_fields() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/eventos", Some(full_event())).await;
    let id = created["id"].as_i64().unwrap();

    let replacement = json!({ "title": "Festa adiada", "start": "2026-01-10", "end": "2026-01-11" });
    let (status, body) = send(&app, Method::PUT, &format!("/eventos/{}", id), Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["title"], "Festa adiada");
    assert_eq!(body["location"], Value::Null);

    let (_, stored) = send(&app, Method::GET, &format!("/eventos/{}", id), None).await;
    assert_eq!(stored, body);
}

#[tokio::test]
async fn update_of_missing_event_still_answers_200() {
    let payload = json!({ "title": "Fantasma", "start": "2025-01-01", "end": "2025-01-02" });
    let (status, body) = send(&app(), Method::PUT, "/eventos/424242", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(424242));
}

#[tokio::test]
async fn update_validates_body() {
    let payload = json!({ "title": "Sem fim", "start": "2025-01-01" });
    let (status, body) = send(&app(), Method::PUT, "/eventos/1", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Campo obrigatório ausente ou inválido: end");
}

#[tokio::test]
async fn delete_removes_event() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/eventos", Some(full_event())).await;
    let uri = format!("/eventos/{}", created["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_event_is_204() {
    let (status, _) = send(&app(), Method::DELETE, "/eventos/99999", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn store_failures_map_to_fixed_500_messages() {
    let app = app_with(Arc::new(FailingRepository));
    let valid = json!({ "title": "Ok", "start": "2025-01-01", "end": "2025-01-02" });

    let cases = [
        (Method::GET, "/eventos", None, "Erro ao buscar eventos"),
        (Method::GET, "/eventos/1", None, "Erro ao buscar evento"),
        (Method::POST, "/eventos", Some(valid.clone()), "Erro ao inserir evento"),
        (Method::PUT, "/eventos/1", Some(valid), "Erro ao atualizar evento"),
        (Method::DELETE, "/eventos/1", None, "Erro ao excluir evento"),
    ];

    for (method, uri, body, message) in cases {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(response, json!({ "error": message }));
    }
}

#[tokio::test]
async fn validation_runs_before_the_store() {
    let app = app_with(Arc::new(FailingRepository));
    let (status, _) = send(&app, Method::POST, "/eventos", Some(json!({ "start": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn custom_mount_path() {
    let app = build_router(AppState::new(Arc::new(MemoryEventRepository::new())), "/api/eventos");

    let (status, _) = send(&app, Method::GET, "/api/eventos", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/eventos", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_is_open() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/eventos")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
