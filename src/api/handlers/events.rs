//! Event discovery handlers: nearby, upcoming list, detail.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    EventListResponse, NearbyEventsResponse, NearbyParams, PaginationParams,
};
use crate::app_state::AppState;
use crate::domain::{Event, EventId, NearbyQuery};
use crate::error::{ErrorResponse, HubError};

/// `GET /events/nearby` — Upcoming events closest to a position.
///
/// # Errors
///
/// Returns [`HubError::InvalidArgument`] on missing or invalid
/// coordinates or radius, and [`HubError::UpstreamUnavailable`] if the
/// store cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/events/nearby",
    tag = "Events",
    summary = "Find nearby events",
    description = "Returns up to 12 published upcoming events within `radius` km of the given position, nearest first. Each event carries its `distance` in km.",
    params(NearbyParams),
    responses(
        (status = 200, description = "Nearby events (possibly empty)", body = NearbyEventsResponse),
        (status = 400, description = "Invalid coordinates or radius", body = ErrorResponse),
        (status = 503, description = "Event store unavailable", body = ErrorResponse),
    )
)]
pub async fn nearby_events(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<impl IntoResponse, HubError> {
    let query = NearbyQuery::parse(
        params.latitude.as_deref(),
        params.longitude.as_deref(),
        params.radius.as_deref(),
        state.event_service.settings(),
    )?;

    let events = state.event_service.nearby_events(&query).await?;

    Ok(Json(NearbyEventsResponse {
        count: events.len(),
        events,
        user_location: query.origin,
        radius: query.radius_km,
    }))
}

/// `GET /events` — Upcoming published events, paginated.
///
/// # Errors
///
/// Returns [`HubError::UpstreamUnavailable`] if the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List upcoming events",
    description = "Returns published events that have not started yet, soonest first.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated event list", body = EventListResponse),
        (status = 503, description = "Event store unavailable", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, HubError> {
    let params = params.clamped();
    let page = state
        .event_service
        .upcoming_events(params.offset(), u64::from(params.per_page))
        .await?;

    Ok(Json(EventListResponse {
        pagination: params.meta(page.total),
        data: page.events,
    }))
}

/// `GET /events/:id` — Published event details.
///
/// # Errors
///
/// Returns [`HubError::EventNotFound`] if no published event has this id.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event details",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 503, description = "Event store unavailable", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, HubError> {
    let event = state.event_service.event(EventId::from_uuid(id)).await?;
    Ok(Json(event))
}

/// Event discovery routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/nearby", get(nearby_events))
        .route("/events/{id}", get(get_event))
}
