//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Bson, Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{EmailCount, Item, ItemDocument, ItemFilter};
use crate::repository::ItemRepository;

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    /// Create a new MongoItemRepository backed by the `items` collection.
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("mydb");
    /// let repo = MongoItemRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<ItemDocument>("items");
        Self { collection }
    }

    /// Create a new MongoItemRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<ItemDocument>(collection_name);
        Self { collection }
    }

    /// Build a MongoDB filter document from ItemFilter.
    ///
    /// Date parameters are compared from midnight UTC of the given day, so
    /// a document dated anywhere on that day (or later) matches.
    fn build_filter(filter: &ItemFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref email) = filter.email {
            doc.insert("email", email);
        }

        if let Some(expiry_date) = filter.expiry_date {
            doc.insert("expiry_date", doc! { "$gte": start_of_day(expiry_date) });
        }

        if let Some(insert_date) = filter.insert_date {
            doc.insert("insert_date", doc! { "$gte": start_of_day(insert_date) });
        }

        if let Some(quantity) = filter.quantity {
            doc.insert("quantity", doc! { "$gte": quantity });
        }

        doc
    }
}

/// Midnight UTC of the given day as a BSON datetime.
fn start_of_day(date: NaiveDate) -> Bson {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    Bson::DateTime(bson::DateTime::from_millis(midnight.timestamp_millis()))
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, item), fields(item_name = %item.item_name))]
    async fn create(&self, item: ItemDocument) -> ItemResult<Item> {
        let result = self.collection.insert_one(&item).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(ItemError::MalformedDocument)?;

        let stored = ItemDocument {
            id: Some(id),
            ..item
        };

        tracing::info!(item_id = %id, "Item created successfully");
        Item::try_from(stored)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ItemResult<Option<Item>> {
        let doc = self.collection.find_one(doc! { "_id": id }).await?;
        doc.map(Item::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn filter(&self, filter: ItemFilter) -> ItemResult<Vec<Item>> {
        let mongo_filter = Self::build_filter(&filter);

        let cursor = self.collection.find(mongo_filter).await?;
        let documents: Vec<ItemDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Item::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_email(&self) -> ItemResult<Vec<EmailCount>> {
        let pipeline = vec![doc! {
            "$group": { "_id": "$email", "count": { "$sum": 1 } }
        }];

        let cursor = self.collection.aggregate(pipeline).await?;
        let rows: Vec<Document> = cursor.try_collect().await?;

        rows.into_iter()
            .map(|row| {
                bson::from_document::<EmailCount>(row)
                    .map_err(|e| ItemError::Database(e.to_string()))
            })
            .collect()
    }

    #[instrument(skip(self, item))]
    async fn replace(&self, id: ObjectId, item: ItemDocument) -> ItemResult<Option<Item>> {
        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &item)
            .await?;

        // matched_count rather than modified_count: replacing a document
        // with identical contents is still a successful update.
        if result.matched_count == 0 {
            return Ok(None);
        }

        let stored = ItemDocument {
            id: Some(id),
            ..item
        };

        tracing::info!(item_id = %id, "Item updated successfully");
        Item::try_from(stored).map(Some)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ItemResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        if result.deleted_count > 0 {
            tracing::info!(item_id = %id, "Item deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}
