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
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ClockInResult;
use crate::models::{ClockIn, ClockInFilter, CreateClockIn, UpdateClockIn};
use crate::repository::ClockInRepository;
use crate::service::ClockInService;

/// Response for a successful clock-in creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClockInCreated {
    /// Identifier of the new record (hex ObjectId)
    pub id: String,
    pub message: String,
}

impl ClockInCreated {
    fn new(id: ObjectId) -> Self {
        Self {
            id: id.to_hex(),
            message: "Clock-in entry created successfully.".to_string(),
        }
    }
}

/// Confirmation message for a successful deletion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClockInDeleted {
    pub message: String,
}

/// OpenAPI documentation for Clock-In API
#[derive(OpenApi)]
#[openapi(
    paths(create_clock_in, get_clock_in, filter_clock_ins, update_clock_in, delete_clock_in),
    components(
        schemas(ClockIn, CreateClockIn, UpdateClockIn, ClockInFilter, ClockInCreated, ClockInDeleted),
        responses(
            NotFoundResponse,
            ValidationErrorResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Clock-In", description = "Employee clock-in endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the clock-in router with all HTTP endpoints
pub fn router<R: ClockInRepository + 'static>(service: ClockInService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/clock-in", post(create_clock_in))
        .route("/filter", get(filter_clock_ins))
        .route(
            "/{id}",
            get(get_clock_in).put(update_clock_in).delete(delete_clock_in),
        )
        .with_state(shared_service)
}

/// Record a new clock-in
#[utoipa::path(
    post,
    path = "/clock-in",
    tag = "Clock-In",
    request_body = CreateClockIn,
    responses(
        (status = 201, description = "Clock-in recorded", body = ClockInCreated),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_clock_in<R: ClockInRepository>(
    State(service): State<Arc<ClockInService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateClockIn>,
) -> ClockInResult<impl IntoResponse> {
    let id = service.create_clock_in(input).await?;
    Ok((StatusCode::CREATED, Json(ClockInCreated::new(id))))
}

/// Get a clock-in record by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Clock-In",
    params(
        ("id" = String, Path, description = "Record ID (hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Record found", body = ClockIn),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_clock_in<R: ClockInRepository>(
    State(service): State<Arc<ClockInService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ClockInResult<Json<ClockIn>> {
    let record = service.get_clock_in(id).await?;
    Ok(Json(record))
}

/// List clock-in records with optional filters
#[utoipa::path(
    get,
    path = "/filter",
    tag = "Clock-In",
    params(ClockInFilter),
    responses(
        (status = 200, description = "Records matching the filter", body = Vec<ClockIn>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_clock_ins<R: ClockInRepository>(
    State(service): State<Arc<ClockInService<R>>>,
    Query(filter): Query<ClockInFilter>,
) -> ClockInResult<Json<Vec<ClockIn>>> {
    let records = service.filter_clock_ins(filter).await?;
    Ok(Json(records))
}

/// Partially update a clock-in record
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Clock-In",
    params(
        ("id" = String, Path, description = "Record ID (hex ObjectId)")
    ),
    request_body = UpdateClockIn,
    responses(
        (status = 200, description = "Record updated", body = ClockIn),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_clock_in<R: ClockInRepository>(
    State(service): State<Arc<ClockInService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(update): ValidatedJson<UpdateClockIn>,
) -> ClockInResult<Json<ClockIn>> {
    let record = service.update_clock_in(id, update).await?;
    Ok(Json(record))
}

/// Delete a clock-in record
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Clock-In",
    params(
        ("id" = String, Path, description = "Record ID (hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Record deleted", body = ClockInDeleted),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_clock_in<R: ClockInRepository>(
    State(service): State<Arc<ClockInService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ClockInResult<Json<ClockInDeleted>> {
    service.delete_clock_in(id).await?;
    Ok(Json(ClockInDeleted {
        message: "Clock-in record deleted successfully!".to_string(),
    }))
}
