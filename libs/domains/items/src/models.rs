use chrono::{DateTime, Duration, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ItemError;

/// Stored form of an inventory item.
///
/// `_id` is absent on insert; MongoDB assigns it. Datetimes are stored as
/// native BSON dates so range filters compare correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expiry_date: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub insert_date: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    pub description: String,
}

/// API-facing item: the store-native `_id` becomes a hex string `id`,
/// all other fields pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Server-assigned identifier (hex ObjectId); immutable once assigned
    pub id: String,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: DateTime<Utc>,
    pub insert_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub description: String,
}

impl TryFrom<ItemDocument> for Item {
    type Error = ItemError;

    fn try_from(doc: ItemDocument) -> Result<Self, Self::Error> {
        let id = doc.id.ok_or(ItemError::MalformedDocument)?;
        Ok(Self {
            id: id.to_hex(),
            name: doc.name,
            email: doc.email,
            item_name: doc.item_name,
            quantity: doc.quantity,
            expiry_date: doc.expiry_date,
            insert_date: doc.insert_date,
            created_at: doc.created_at,
            description: doc.description,
        })
    }
}

/// DTO for creating an item; also the payload for the full-replace update.
///
/// `id` is never accepted on the input side. Timestamps are optional and
/// defaulted at request-handling time. Quantity is expected to be >= 0 but
/// is deliberately not validated.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    /// Defaults to creation time + 30 days
    pub expiry_date: Option<DateTime<Utc>>,
    /// Defaults to creation time
    pub insert_date: Option<DateTime<Utc>>,
    /// Defaults to creation time
    pub created_at: Option<DateTime<Utc>>,
    pub description: String,
}

impl ItemDocument {
    /// Build a storable document from a create payload.
    ///
    /// `now` is injected rather than read from the clock so defaulting is
    /// deterministic under test.
    pub fn new(input: CreateItem, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: input.name,
            email: input.email,
            item_name: input.item_name,
            quantity: input.quantity,
            expiry_date: input.expiry_date.unwrap_or(now + Duration::days(30)),
            insert_date: input.insert_date.unwrap_or(now),
            created_at: input.created_at.unwrap_or(now),
            description: input.description,
        }
    }
}

/// Query filters for the item filter endpoint.
///
/// Absent parameters impose no constraint; an empty parameter set matches
/// every stored item. Dates are accepted as `YYYY-MM-DD` and compared at
/// date-only precision.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
pub struct ItemFilter {
    /// Exact email match
    pub email: Option<String>,
    /// Inclusive lower bound (on-or-after), date-only precision
    pub expiry_date: Option<NaiveDate>,
    /// Inclusive lower bound (on-or-after), date-only precision
    pub insert_date: Option<NaiveDate>,
    /// Inclusive lower bound
    pub quantity: Option<i64>,
}

/// One row of the count-by-email aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmailCount {
    /// Grouping key (the email); serialized under `_id`, the field name the
    /// aggregation stage produces
    #[serde(rename = "_id")]
    pub email: String,
    /// Number of items with this email
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateItem {
        CreateItem {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            item_name: "Milk".to_string(),
            quantity: 3,
            expiry_date: None,
            insert_date: None,
            created_at: None,
            description: "Whole milk".to_string(),
        }
    }

    #[test]
    fn test_factory_defaults_timestamps_from_now() {
        let now = Utc::now();
        let doc = ItemDocument::new(create_input(), now);

        assert!(doc.id.is_none());
        assert_eq!(doc.insert_date, now);
        assert_eq!(doc.created_at, now);
        assert_eq!(doc.expiry_date, now + Duration::days(30));
    }

    #[test]
    fn test_factory_keeps_supplied_timestamps() {
        let now = Utc::now();
        let expiry = now + Duration::days(7);
        let input = CreateItem {
            expiry_date: Some(expiry),
            insert_date: Some(now - Duration::days(1)),
            ..create_input()
        };

        let doc = ItemDocument::new(input, now);
        assert_eq!(doc.expiry_date, expiry);
        assert_eq!(doc.insert_date, now - Duration::days(1));
        assert_eq!(doc.created_at, now);
    }

    #[test]
    fn test_mapping_renames_native_id_to_string() {
        let oid = ObjectId::new();
        let mut doc = ItemDocument::new(create_input(), Utc::now());
        doc.id = Some(oid);

        let item = Item::try_from(doc.clone()).unwrap();
        assert_eq!(item.id, oid.to_hex());
        assert_eq!(item.name, doc.name);
        assert_eq!(item.quantity, doc.quantity);
    }

    #[test]
    fn test_mapping_rejects_document_without_id() {
        let doc = ItemDocument::new(create_input(), Utc::now());
        assert!(matches!(
            Item::try_from(doc),
            Err(ItemError::MalformedDocument)
        ));
    }

    #[test]
    fn test_insert_side_serialization_omits_missing_id() {
        let doc = ItemDocument::new(create_input(), Utc::now());
        let bson = mongodb::bson::to_document(&doc).unwrap();
        assert!(!bson.contains_key("_id"));
        assert!(bson.get_datetime("expiry_date").is_ok());
    }

    #[test]
    fn test_filter_deserializes_date_only_params() {
        let filter: ItemFilter =
            serde_json::from_str(r#"{"expiry_date":"2025-01-31","quantity":5}"#).unwrap();
        assert_eq!(
            filter.expiry_date,
            Some(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())
        );
        assert_eq!(filter.quantity, Some(5));
        assert_eq!(filter.email, None);
    }

    #[test]
    fn test_email_count_uses_wire_field_name() {
        let row = EmailCount {
            email: "a@example.com".to_string(),
            count: 2,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["_id"], "a@example.com");
        assert_eq!(json["count"], 2);
    }
}
