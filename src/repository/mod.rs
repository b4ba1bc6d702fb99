use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{Event, EventInput};

pub mod memory;
pub mod mysql;

pub use memory::MemoryEventRepository;
pub use mysql::MySqlEventRepository;

/// Data access for the `eventos` table.
///
/// Update and delete report success whether or not a row matched `id`.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events, or those whose title, description or type contains
    /// `filter` case-insensitively. An empty filter means no filter.
    async fn list(&self, filter: Option<&str>) -> StoreResult<Vec<Event>>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Event>>;

    /// Inserts a row and returns the generated id.
    async fn create(&self, input: &EventInput) -> StoreResult<i64>;

    /// Overwrites every mutable column of the row matching `id`.
    async fn update_by_id(&self, id: i64, input: &EventInput) -> StoreResult<()>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}

/// `None` for absent or empty filters.
pub(crate) fn active_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty())
}
