use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::models::{Event, EventInput};
use crate::repository::{active_filter, EventRepository};

const SELECT_EVENTS: &str = "SELECT id, title, `start`, `end`, color, location, description, \
     notify, notifyTime, `type` FROM eventos";

/// MySQL-backed repository sharing the application's pool.
#[derive(Clone)]
pub struct MySqlEventRepository {
    pool: MySqlPool,
}

impl MySqlEventRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for MySqlEventRepository {
    async fn list(&self, filter: Option<&str>) -> StoreResult<Vec<Event>> {
        let events = match active_filter(filter) {
            None => {
                sqlx::query_as::<_, Event>(&format!("{} ORDER BY id", SELECT_EVENTS))
                    .fetch_all(&self.pool)
                    .await?
            }
            Some(text) => {
                // utf8mb4_unicode_ci makes LIKE case-insensitive
                let pattern = format!("%{}%", text);
                sqlx::query_as::<_, Event>(&format!(
                    "{} WHERE title LIKE ? OR description LIKE ? OR `type` LIKE ? ORDER BY id",
                    SELECT_EVENTS
                ))
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = events.len(), filter = ?filter, "Listed events");
        Ok(events)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!("{} WHERE id = ?", SELECT_EVENTS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn create(&self, input: &EventInput) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO eventos (title, `start`, `end`, color, location, description, notify, notifyTime, `type`)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.title)
        .bind(&input.start)
        .bind(&input.end)
        .bind(&input.color)
        .bind(&input.location)
        .bind(&input.description)
        .bind(input.notify)
        .bind(input.notify_time)
        .bind(&input.event_type)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        info!(event_id = id, "Created event");
        Ok(id)
    }

    async fn update_by_id(&self, id: i64, input: &EventInput) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE eventos SET title = ?, `start` = ?, `end` = ?, color = ?, location = ?,
                description = ?, notify = ?, notifyTime = ?, `type` = ?
             WHERE id = ?",
        )
        .bind(&input.title)
        .bind(&input.start)
        .bind(&input.end)
        .bind(&input.color)
        .bind(&input.location)
        .bind(&input.description)
        .bind(input.notify)
        .bind(input.notify_time)
        .bind(&input.event_type)
        .bind(id)
        .execute(&self.pool)
        .await?;

        info!(event_id = id, rows = result.rows_affected(), "Updated event");
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM eventos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!(event_id = id, rows = result.rows_affected(), "Deleted event");
        Ok(())
    }
}
