//! Repository trait for item persistence

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ItemResult;
use crate::models::{EmailCount, Item, ItemDocument, ItemFilter};

/// Data access abstraction for items.
///
/// Handlers and services depend on this trait, never on the MongoDB
/// implementation directly, so unit tests can substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item and return it with its assigned identifier.
    async fn create(&self, item: ItemDocument) -> ItemResult<Item>;

    /// Fetch a single item by identifier.
    async fn get_by_id(&self, id: ObjectId) -> ItemResult<Option<Item>>;

    /// List items matching the given filter. An empty filter matches all.
    async fn filter(&self, filter: ItemFilter) -> ItemResult<Vec<Item>>;

    /// Group all items by email and count each group.
    async fn count_by_email(&self) -> ItemResult<Vec<EmailCount>>;

    /// Replace the full document at `id`. Returns `None` when no document
    /// matched.
    async fn replace(&self, id: ObjectId, item: ItemDocument) -> ItemResult<Option<Item>>;

    /// Delete the item at `id`. Returns whether a document was removed.
    async fn delete(&self, id: ObjectId) -> ItemResult<bool>;
}
