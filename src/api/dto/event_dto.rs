//! Event discovery DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::{Coordinate, Event, NearbyEvent};

/// Query string of `GET /events/nearby`.
///
/// Values are kept as raw strings so malformed numbers are reported with
/// the service's own error body rather than a generic extractor error.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyParams {
    /// User latitude in degrees, `[-90, 90]`.
    #[param(value_type = f64, example = 48.8566)]
    pub latitude: Option<String>,
    /// User longitude in degrees, `[-180, 180]`.
    #[param(value_type = f64, example = 2.3522)]
    pub longitude: Option<String>,
    /// Search radius in kilometres. Defaults to 50.
    #[param(value_type = Option<f64>, example = 50.0)]
    pub radius: Option<String>,
}

/// Response body of `GET /events/nearby`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyEventsResponse {
    /// Matching events, nearest first, each with its `distance` in km.
    pub events: Vec<NearbyEvent>,
    /// Position the search was made from.
    pub user_location: Coordinate,
    /// Effective radius in kilometres.
    pub radius: f64,
    /// Number of returned events.
    pub count: usize,
}

/// Paginated response body of `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events of the page, start date ascending.
    pub data: Vec<Event>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
