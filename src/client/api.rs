use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::client::ClientError;
use crate::models::{Event, EventInput};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/eventos";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the events endpoints. `base_url` is the mount, e.g.
/// `http://localhost:3001/eventos`.
#[derive(Clone)]
pub struct EventsApi {
    http: Client,
    base_url: String,
}

impl EventsApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn event_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<Event>, ClientError> {
        let mut request = self.http.get(&self.base_url);
        if let Some(filter) = filter {
            request = request.query(&[("filtro", filter)]);
        }
        let response = ensure_success(request.send().await?).await?;
        let events: Vec<Event> = response.json().await?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    /// `None` when the server answers 404.
    pub async fn get(&self, id: i64) -> Result<Option<Event>, ClientError> {
        let response = self.http.get(self.event_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(ensure_success(response).await?.json().await?))
    }

    pub async fn create(&self, input: &EventInput) -> Result<Event, ClientError> {
        let response = self.http.post(&self.base_url).json(input).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    pub async fn update(&self, id: i64, input: &EventInput) -> Result<Event, ClientError> {
        let response = self.http.put(self.event_url(id)).json(input).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self.http.delete(self.event_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into `ClientError::Api`, keeping the server's
/// `error` message when the body carries one.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
