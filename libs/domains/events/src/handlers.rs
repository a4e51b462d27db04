//! HTTP handlers for the event catalog

use crate::models::{CreateEvent, Event};
use crate::service::EventService;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::{
    AppError, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::instrument;
use utoipa::OpenApi;

/// OpenAPI documentation for the event catalog
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event),
    components(
        schemas(Event, CreateEvent),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "events", description = "Event catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Events router state
pub type EventsState = Arc<EventService>;

static HANDLED_REQUESTS: AtomicU64 = AtomicU64::new(0);

/// Number of requests the event handlers have served since startup.
///
/// Diagnostic only.
pub fn handled_requests() -> u64 {
    HANDLED_REQUESTS.load(Ordering::Relaxed)
}

fn count_request() {
    HANDLED_REQUESTS.fetch_add(1, Ordering::Relaxed);
}

/// Create the events router
pub fn events_router(state: EventsState) -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/{id}", get(get_event))
        .with_state(state)
}

/// List all events
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn list_events(State(state): State<EventsState>) -> Result<Json<Vec<Event>>, AppError> {
    count_request();

    let events = state.list().await?;
    if events.is_empty() {
        return Err(AppError::NotFound("No events found".to_string()));
    }

    Ok(Json(events))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "/",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event,
            headers(("Location" = String, description = "URL of the created event"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, uri, create), fields(event_name = %create.name))]
pub async fn create_event(
    State(state): State<EventsState>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(create): ValidatedJson<CreateEvent>,
) -> Result<impl IntoResponse, AppError> {
    count_request();

    let event = state.create(create).await?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), event.id);
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&location) {
        headers.insert(header::LOCATION, value);
    }

    Ok((StatusCode::CREATED, headers, Json(event)))
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<EventsState>,
    UuidPath(id): UuidPath,
) -> Result<Json<Event>, AppError> {
    count_request();

    let event = state.get(id).await?;
    Ok(Json(event))
}
