use chrono::{DateTime, Utc};
use tracing::debug;

use crate::client::time::parse_timestamp;
use crate::client::{ClientError, EventsApi};
use crate::models::{Event, EventInput};

pub const UPCOMING_LIMIT: usize = 5;

/// The nearest events starting at or after `now`, soonest first.
///
/// Events whose `start` does not parse are left out.
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>) -> Vec<&Event> {
    let mut upcoming: Vec<(DateTime<Utc>, &Event)> = events
        .iter()
        .filter_map(|e| parse_timestamp(&e.start).map(|start| (start, e)))
        .filter(|(start, _)| *start >= now)
        .collect();
    upcoming.sort_by_key(|(start, _)| *start);
    upcoming
        .into_iter()
        .take(UPCOMING_LIMIT)
        .map(|(_, e)| e)
        .collect()
}

/// Client-side view of the events, backed by the API.
///
/// The fetched list is a cache: every create, update or delete drops it and
/// the next read goes back to the server.
pub struct Calendar {
    api: EventsApi,
    cache: Option<Vec<Event>>,
}

impl Calendar {
    pub fn new(api: EventsApi) -> Self {
        Self { api, cache: None }
    }

    pub fn api(&self) -> &EventsApi {
        &self.api
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub async fn events(&mut self) -> Result<&[Event], ClientError> {
        if self.cache.is_none() {
            let events = self.api.list(None).await?;
            debug!(count = events.len(), "Calendar cache refreshed");
            self.cache = Some(events);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    /// Looks the event up in the cached list, as clicking a calendar entry does.
    pub async fn find(&mut self, id: i64) -> Result<Option<&Event>, ClientError> {
        Ok(self.events().await?.iter().find(|e| e.id == id))
    }

    pub async fn upcoming(&mut self, now: DateTime<Utc>) -> Result<Vec<&Event>, ClientError> {
        Ok(upcoming_events(self.events().await?, now))
    }

    pub async fn create(&mut self, input: &EventInput) -> Result<Event, ClientError> {
        let created = self.api.create(input).await?;
        self.invalidate();
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, input: &EventInput) -> Result<Event, ClientError> {
        let updated = self.api.update(id, input).await?;
        self.invalidate();
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.api.delete(id).await?;
        self.invalidate();
        Ok(())
    }
}
