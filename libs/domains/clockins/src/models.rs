use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ClockInError;

/// Stored form of a clock-in record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockInDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub location: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub insert_datetime: DateTime<Utc>,
}

/// API-facing clock-in record with a hex string identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClockIn {
    /// Server-assigned identifier (hex ObjectId)
    pub id: String,
    pub email: String,
    pub location: String,
    /// Server-assigned record timestamp
    pub insert_datetime: DateTime<Utc>,
}

impl TryFrom<ClockInDocument> for ClockIn {
    type Error = ClockInError;

    fn try_from(doc: ClockInDocument) -> Result<Self, Self::Error> {
        let id = doc.id.ok_or(ClockInError::MalformedDocument)?;
        Ok(Self {
            id: id.to_hex(),
            email: doc.email,
            location: doc.location,
            insert_datetime: doc.insert_datetime,
        })
    }
}

/// DTO for creating a clock-in record.
///
/// A client-supplied `insert_datetime` is accepted but discarded; the
/// record timestamp is always assigned by the server.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClockIn {
    #[validate(email)]
    pub email: String,
    pub location: String,
    /// Ignored; the server stamps the record itself
    pub insert_datetime: Option<DateTime<Utc>>,
}

impl ClockInDocument {
    /// Build a storable record, stamping it with the server clock.
    pub fn new(input: CreateClockIn, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            email: input.email,
            location: input.location,
            insert_datetime: now,
        }
    }
}

/// DTO for partially updating a clock-in record.
///
/// Only fields present in the payload change. `insert_datetime` is accepted
/// for wire compatibility but never applied.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClockIn {
    #[validate(email)]
    pub email: Option<String>,
    pub location: Option<String>,
    /// Ignored; the record timestamp is immutable
    pub insert_datetime: Option<DateTime<Utc>>,
}

/// Query filters for the clock-in filter endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
pub struct ClockInFilter {
    /// Exact email match
    pub email: Option<String>,
    /// Exact location match
    pub location: Option<String>,
    /// Strict lower bound (after, exclusive), full datetime precision
    pub insert_datetime: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_stamps_server_time_over_client_time() {
        let now = Utc::now();
        let input = CreateClockIn {
            email: "worker@example.com".to_string(),
            location: "Warehouse A".to_string(),
            insert_datetime: Some(now - chrono::Duration::days(5)),
        };

        let doc = ClockInDocument::new(input, now);
        assert!(doc.id.is_none());
        assert_eq!(doc.insert_datetime, now);
    }

    #[test]
    fn test_mapping_rejects_document_without_id() {
        let doc = ClockInDocument {
            id: None,
            email: "worker@example.com".to_string(),
            location: "Warehouse A".to_string(),
            insert_datetime: Utc::now(),
        };
        assert!(matches!(
            ClockIn::try_from(doc),
            Err(ClockInError::MalformedDocument)
        ));
    }

    #[test]
    fn test_create_rejects_invalid_email() {
        use validator::Validate;

        let input = CreateClockIn {
            email: "not-an-email".to_string(),
            location: "Warehouse A".to_string(),
            insert_datetime: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_validates_email_only_when_present() {
        use validator::Validate;

        let update = UpdateClockIn {
            location: Some("Warehouse B".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let update = UpdateClockIn {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_stored_timestamp_is_a_native_bson_date() {
        let doc = ClockInDocument {
            id: None,
            email: "worker@example.com".to_string(),
            location: "Warehouse A".to_string(),
            insert_datetime: Utc::now(),
        };
        let bson = mongodb::bson::to_document(&doc).unwrap();
        assert!(bson.get_datetime("insert_datetime").is_ok());
    }
}
