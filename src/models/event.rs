use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `eventos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub start: String,
    pub end: String,
    pub color: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub notify: Option<bool>,
    #[serde(rename = "notifyTime")]
    #[sqlx(rename = "notifyTime")]
    pub notify_time: Option<i32>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub event_type: Option<String>,
}

/// Client-supplied fields for a create or a full update.
///
/// Every field is optional at the type level so that a missing `title`
/// reaches the validator and produces its message instead of a decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub notify: Option<bool>,
    #[serde(rename = "notifyTime")]
    pub notify_time: Option<i32>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl EventInput {
    /// The response shape for create and update: submitted fields plus `id`.
    /// Required fields are assumed validated; absent ones echo as empty strings.
    pub fn into_event(self, id: i64) -> Event {
        Event {
            id,
            title: self.title.unwrap_or_default(),
            start: self.start.unwrap_or_default(),
            end: self.end.unwrap_or_default(),
            color: self.color,
            location: self.location,
            description: self.description,
            notify: self.notify,
            notify_time: self.notify_time,
            event_type: self.event_type,
        }
    }
}

impl From<Event> for EventInput {
    fn from(event: Event) -> Self {
        EventInput {
            title: Some(event.title),
            start: Some(event.start),
            end: Some(event.end),
            color: event.color,
            location: event.location,
            description: event.description,
            notify: event.notify,
            notify_time: event.notify_time,
            event_type: event.event_type,
        }
    }
}
