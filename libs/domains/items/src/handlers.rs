use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, InternalServerErrorResponse, NotFoundResponse,
        ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{CreateItem, EmailCount, Item, ItemFilter};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(create_item, get_item, filter_items, count_items_by_email, update_item, delete_item),
    components(
        schemas(Item, CreateItem, ItemFilter, EmailCount),
        responses(
            NotFoundResponse,
            ValidationErrorResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Inventory item endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_item))
        .route("/filter/", get(filter_items))
        .route("/aggregate/count-by-email/", get(count_items_by_email))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID (hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// List items with optional filters
#[utoipa::path(
    get,
    path = "/filter/",
    tag = "Items",
    params(ItemFilter),
    responses(
        (status = 200, description = "Items matching the filter", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    Query(filter): Query<ItemFilter>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.filter_items(filter).await?;
    Ok(Json(items))
}

/// Count items grouped by email
#[utoipa::path(
    get,
    path = "/aggregate/count-by-email/",
    tag = "Items",
    responses(
        (status = 200, description = "Item counts per email", body = Vec<EmailCount>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_items_by_email<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Json<Vec<EmailCount>>> {
    let counts = service.count_by_email().await?;
    Ok(Json(counts))
}

/// Replace an item with a new payload
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID (hex ObjectId)")
    ),
    request_body = CreateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<Json<Item>> {
    let item = service.update_item(id, input).await?;
    Ok(Json(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = String, Path, description = "Item ID (hex ObjectId)")
    ),
    responses(
        (status = 204, description = "Item deleted successfully"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ItemResult<impl IntoResponse> {
    service.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemDocument;
    use crate::repository::MockItemRepository;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use mongodb::bson::oid::ObjectId;
    use tower::ServiceExt;

    fn app(repo: MockItemRepository) -> Router {
        router(ItemService::new(repo))
    }

    fn sample_item(id: ObjectId) -> Item {
        Item {
            id: id.to_hex(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            item_name: "Milk".to_string(),
            quantity: 3,
            expiry_date: Utc::now(),
            insert_date: Utc::now(),
            created_at: Utc::now(),
            description: "Whole milk".to_string(),
        }
    }

    fn create_body() -> String {
        serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "item_name": "Milk",
            "quantity": 3,
            "description": "Whole milk"
        })
        .to_string()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_item_returns_201_with_assigned_id() {
        let id = ObjectId::new();
        let mut repo = MockItemRepository::new();
        repo.expect_create().returning(move |doc| {
            let stored = ItemDocument {
                id: Some(id),
                ..doc
            };
            Ok(Item::try_from(stored).unwrap())
        });

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(create_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["id"], id.to_hex());
        assert_eq!(body["item_name"], "Milk");
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_before_the_store() {
        // No expectations: a bad identifier must never reach the repository.
        let repo = MockItemRepository::new();

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri("/not-a-hex-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "INVALID_OBJECT_ID");
    }

    #[tokio::test]
    async fn test_get_missing_item_returns_404() {
        let mut repo = MockItemRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", ObjectId::new().to_hex()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_filter_without_params_matches_everything() {
        let id = ObjectId::new();
        let mut repo = MockItemRepository::new();
        repo.expect_filter()
            .withf(|filter| *filter == ItemFilter::default())
            .returning(move |_| Ok(vec![sample_item(id)]));

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri("/filter/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_parses_quantity_and_email_params() {
        let mut repo = MockItemRepository::new();
        repo.expect_filter()
            .withf(|filter| {
                filter.quantity == Some(5) && filter.email.as_deref() == Some("a@b.com")
            })
            .returning(|_| Ok(vec![]));

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri("/filter/?quantity=5&email=a@b.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_aggregate_returns_counts_per_email() {
        let mut repo = MockItemRepository::new();
        repo.expect_count_by_email().returning(|| {
            Ok(vec![
                EmailCount {
                    email: "a@example.com".to_string(),
                    count: 2,
                },
                EmailCount {
                    email: "b@example.com".to_string(),
                    count: 1,
                },
            ])
        });

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri("/aggregate/count-by-email/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["_id"], "a@example.com");
        assert_eq!(body[0]["count"], 2);
    }

    #[tokio::test]
    async fn test_aggregate_on_empty_collection_returns_404() {
        let mut repo = MockItemRepository::new();
        repo.expect_count_by_email().returning(|| Ok(vec![]));

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .uri("/aggregate/count-by-email/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_item_returns_404() {
        let mut repo = MockItemRepository::new();
        repo.expect_replace().returning(|_, _| Ok(None));

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/{}", ObjectId::new().to_hex()))
                    .header("content-type", "application/json")
                    .body(Body::from(create_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_returns_replaced_item() {
        let id = ObjectId::new();
        let mut repo = MockItemRepository::new();
        repo.expect_replace()
            .withf(move |replace_id, doc| *replace_id == id && doc.id.is_none())
            .returning(move |replace_id, doc| {
                let stored = ItemDocument {
                    id: Some(replace_id),
                    ..doc
                };
                Ok(Some(Item::try_from(stored).unwrap()))
            });

        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/{}", id.to_hex()))
                    .header("content-type", "application/json")
                    .body(Body::from(create_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], id.to_hex());
    }

    #[tokio::test]
    async fn test_delete_returns_204_then_404() {
        let id = ObjectId::new();

        let mut repo = MockItemRepository::new();
        repo.expect_delete().returning(|_| Ok(true));
        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", id.to_hex()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let mut repo = MockItemRepository::new();
        repo.expect_delete().returning(|_| Ok(false));
        let response = app(repo)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", id.to_hex()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
