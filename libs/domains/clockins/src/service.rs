//! Clock-In Service - Business logic layer

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ClockInError, ClockInResult};
use crate::models::{ClockIn, ClockInDocument, ClockInFilter, CreateClockIn, UpdateClockIn};
use crate::repository::ClockInRepository;

/// Clock-in service providing business logic operations
pub struct ClockInService<R: ClockInRepository> {
    repository: Arc<R>,
}

impl<R: ClockInRepository> ClockInService<R> {
    /// Create a new ClockInService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Record a clock-in, stamping it with the server clock.
    #[instrument(skip(self, input), fields(location = %input.location))]
    pub async fn create_clock_in(&self, input: CreateClockIn) -> ClockInResult<ObjectId> {
        let record = ClockInDocument::new(input, Utc::now());
        self.repository.create(record).await
    }

    /// Get a clock-in record by ID
    #[instrument(skip(self))]
    pub async fn get_clock_in(&self, id: ObjectId) -> ClockInResult<ClockIn> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ClockInError::NotFound(id))
    }

    /// List clock-in records matching the given filters
    #[instrument(skip(self))]
    pub async fn filter_clock_ins(&self, filter: ClockInFilter) -> ClockInResult<Vec<ClockIn>> {
        self.repository.filter(filter).await
    }

    /// Partially update a clock-in record and return the merged result.
    #[instrument(skip(self, update))]
    pub async fn update_clock_in(
        &self,
        id: ObjectId,
        update: UpdateClockIn,
    ) -> ClockInResult<ClockIn> {
        self.repository
            .update(id, update)
            .await?
            .ok_or(ClockInError::NotFound(id))
    }

    /// Delete a clock-in record
    #[instrument(skip(self))]
    pub async fn delete_clock_in(&self, id: ObjectId) -> ClockInResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(ClockInError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: ClockInRepository> Clone for ClockInService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockClockInRepository;

    fn create_input() -> CreateClockIn {
        CreateClockIn {
            email: "worker@example.com".to_string(),
            location: "Warehouse A".to_string(),
            insert_datetime: None,
        }
    }

    #[tokio::test]
    async fn test_create_passes_a_server_stamped_record() {
        let id = ObjectId::new();
        let before = Utc::now();

        let mut repo = MockClockInRepository::new();
        repo.expect_create()
            .withf(move |record| record.id.is_none() && record.insert_datetime >= before)
            .returning(move |_| Ok(id));

        let service = ClockInService::new(repo);
        let created = service.create_clock_in(create_input()).await.unwrap();
        assert_eq!(created, id);
    }

    #[tokio::test]
    async fn test_get_missing_record_is_not_found() {
        let id = ObjectId::new();
        let mut repo = MockClockInRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ClockInService::new(repo);
        let err = service.get_clock_in(id).await.unwrap_err();
        assert!(matches!(err, ClockInError::NotFound(found) if found == id));
    }

    #[tokio::test]
    async fn test_update_unmatched_id_is_not_found() {
        let mut repo = MockClockInRepository::new();
        repo.expect_update().returning(|_, _| Ok(None));

        let service = ClockInService::new(repo);
        let err = service
            .update_clock_in(ObjectId::new(), UpdateClockIn::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClockInError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_unmatched_id_is_not_found() {
        let mut repo = MockClockInRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = ClockInService::new(repo);
        let err = service.delete_clock_in(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, ClockInError::NotFound(_)));
    }
}
