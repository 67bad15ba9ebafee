//! MongoDB implementation of ClockInRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Bson, Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::error::{ClockInError, ClockInResult};
use crate::models::{ClockIn, ClockInDocument, ClockInFilter, UpdateClockIn};
use crate::repository::ClockInRepository;

/// MongoDB implementation of the ClockInRepository
pub struct MongoClockInRepository {
    collection: Collection<ClockInDocument>,
}

impl MongoClockInRepository {
    /// Create a new MongoClockInRepository backed by the `clockins` collection.
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<ClockInDocument>("clockins");
        Self { collection }
    }

    /// Create a new MongoClockInRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<ClockInDocument>(collection_name);
        Self { collection }
    }

    /// Build a MongoDB filter document from ClockInFilter.
    ///
    /// The datetime bound is strict: only records stamped after the given
    /// instant match.
    fn build_filter(filter: &ClockInFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref email) = filter.email {
            doc.insert("email", email);
        }

        if let Some(ref location) = filter.location {
            doc.insert("location", location);
        }

        if let Some(insert_datetime) = filter.insert_datetime {
            let bound = Bson::DateTime(bson::DateTime::from_millis(
                insert_datetime.timestamp_millis(),
            ));
            doc.insert("insert_datetime", doc! { "$gt": bound });
        }

        doc
    }

    /// Build the `$set` document for a partial update.
    ///
    /// The record timestamp is immutable, so `insert_datetime` never appears
    /// here even when the client sends it.
    fn build_update(update: &UpdateClockIn) -> Document {
        let mut set = doc! {};

        if let Some(ref email) = update.email {
            set.insert("email", email);
        }

        if let Some(ref location) = update.location {
            set.insert("location", location);
        }

        set
    }
}

#[async_trait]
impl ClockInRepository for MongoClockInRepository {
    #[instrument(skip(self, record), fields(location = %record.location))]
    async fn create(&self, record: ClockInDocument) -> ClockInResult<ObjectId> {
        let result = self.collection.insert_one(&record).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(ClockInError::MalformedDocument)?;

        tracing::info!(clock_in_id = %id, "Clock-in record created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ClockInResult<Option<ClockIn>> {
        let doc = self.collection.find_one(doc! { "_id": id }).await?;
        doc.map(ClockIn::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn filter(&self, filter: ClockInFilter) -> ClockInResult<Vec<ClockIn>> {
        let mongo_filter = Self::build_filter(&filter);

        let cursor = self.collection.find(mongo_filter).await?;
        let documents: Vec<ClockInDocument> = cursor.try_collect().await?;

        documents.into_iter().map(ClockIn::try_from).collect()
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: ObjectId, update: UpdateClockIn) -> ClockInResult<Option<ClockIn>> {
        let set = Self::build_update(&update);

        if !set.is_empty() {
            let result = self
                .collection
                .update_one(doc! { "_id": id }, doc! { "$set": set })
                .await?;

            // matched_count rather than modified_count: setting a field to
            // its current value is still a successful update.
            if result.matched_count == 0 {
                return Ok(None);
            }

            tracing::info!(clock_in_id = %id, "Clock-in record updated successfully");
        }

        // Re-read so the caller sees the merged record. An empty update
        // degenerates to a plain lookup.
        let doc = self.collection.find_one(doc! { "_id": id }).await?;
        doc.map(ClockIn::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ClockInResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        if result.deleted_count > 0 {
            tracing::info!(clock_in_id = %id, "Clock-in record deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}
