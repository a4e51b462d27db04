//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the catalog service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Catalog API",
        version = "0.1.0",
        description = "REST API for listing, fetching and creating catalog events",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/event", api = domain_events::ApiDoc)
    ),
    tags(
        (name = "events", description = "Event catalog endpoints")
    )
)]
pub struct ApiDoc;
