//! Item Service - Business logic layer

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, EmailCount, Item, ItemDocument, ItemFilter};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// The service layer applies timestamp defaulting and translates absent
/// rows into domain errors before they reach the handlers.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new item, defaulting any omitted timestamps.
    #[instrument(skip(self, input), fields(item_name = %input.item_name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        let document = ItemDocument::new(input, Utc::now());
        self.repository.create(document).await
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: ObjectId) -> ItemResult<Item> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// List items matching the given filters
    #[instrument(skip(self))]
    pub async fn filter_items(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        self.repository.filter(filter).await
    }

    /// Count items grouped by email.
    ///
    /// An empty collection yields NoData rather than an empty list.
    #[instrument(skip(self))]
    pub async fn count_by_email(&self) -> ItemResult<Vec<EmailCount>> {
        let counts = self.repository.count_by_email().await?;
        if counts.is_empty() {
            return Err(ItemError::NoData);
        }
        Ok(counts)
    }

    /// Replace an existing item with a full new payload.
    ///
    /// Omitted timestamps are re-defaulted exactly as on create; the
    /// identifier itself never changes.
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: ObjectId, input: CreateItem) -> ItemResult<Item> {
        let document = ItemDocument::new(input, Utc::now());
        self.repository
            .replace(id, document)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: ObjectId) -> ItemResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(ItemError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
