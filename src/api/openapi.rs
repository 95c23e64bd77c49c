//! OpenAPI document for the REST API.

use utoipa::OpenApi;

use crate::api::dto::{EventListResponse, NearbyEventsResponse, PaginationMeta};
use crate::api::handlers::{events, system};
use crate::domain::{AssociationRef, Coordinate, Event, EventStatus, NearbyEvent};
use crate::error::ErrorResponse;

/// Aggregated OpenAPI specification of every handler.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "campus-hub",
        description = "Event discovery API for campus associations."
    ),
    paths(
        events::nearby_events,
        events::list_events,
        events::get_event,
        system::health_handler,
    ),
    components(schemas(
        Event,
        EventStatus,
        AssociationRef,
        Coordinate,
        NearbyEvent,
        NearbyEventsResponse,
        EventListResponse,
        PaginationMeta,
        ErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Events", description = "Event discovery"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
