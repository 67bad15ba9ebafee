//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory & Clock-In API",
        version = "0.1.0",
        description = "MongoDB-based REST API for inventory items and employee clock-in records",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/items", api = domain_items::ApiDoc),
        (path = "/clock-in", api = domain_clockins::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Inventory item endpoints (MongoDB)"),
        (name = "Clock-In", description = "Employee clock-in endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
