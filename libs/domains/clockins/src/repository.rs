//! Repository trait for clock-in persistence

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ClockInResult;
use crate::models::{ClockIn, ClockInDocument, ClockInFilter, UpdateClockIn};

/// Data access abstraction for clock-in records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClockInRepository: Send + Sync {
    /// Insert a new record and return its assigned identifier.
    async fn create(&self, record: ClockInDocument) -> ClockInResult<ObjectId>;

    /// Fetch a single record by identifier.
    async fn get_by_id(&self, id: ObjectId) -> ClockInResult<Option<ClockIn>>;

    /// List records matching the given filter. An empty filter matches all.
    async fn filter(&self, filter: ClockInFilter) -> ClockInResult<Vec<ClockIn>>;

    /// Apply a partial update to the record at `id` and return the updated
    /// record. Returns `None` when no record matched.
    async fn update(&self, id: ObjectId, update: UpdateClockIn) -> ClockInResult<Option<ClockIn>>;

    /// Delete the record at `id`. Returns whether a record was removed.
    async fn delete(&self, id: ObjectId) -> ClockInResult<bool>;
}
