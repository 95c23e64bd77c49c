//! Proximity ranking of candidate events.
//!
//! [`rank_nearby`] is the in-memory half of the nearby-events query: it
//! takes the candidates loaded from storage (ordered by start date) and
//! returns the closest ones within the radius, nearest first, each
//! carrying its distance. It never touches storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::geo::{MAX_DISTANCE_KM, SearchBand};
use super::{Coordinate, Event};
use crate::error::HubError;

/// Radius applied when the caller does not send one.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Maximum number of events a nearby query returns.
pub const RESULT_LIMIT: usize = 12;

/// Tunables for nearby queries, built from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbySettings {
    /// Radius used when none is supplied.
    pub default_radius_km: f64,
    /// Radii above this are clamped down to it.
    pub max_radius_km: f64,
    /// Result cap.
    pub limit: usize,
}

impl Default for NearbySettings {
    fn default() -> Self {
        Self {
            default_radius_km: DEFAULT_RADIUS_KM,
            max_radius_km: MAX_DISTANCE_KM,
            limit: RESULT_LIMIT,
        }
    }
}

/// A validated nearby-events request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    /// Requesting user's position.
    pub origin: Coordinate,
    /// Effective search radius in kilometres (already clamped).
    pub radius_km: f64,
}

impl NearbyQuery {
    /// Builds a query from an origin and an optional radius.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidArgument`] if `radius_km` is not a
    /// finite positive number.
    pub fn new(
        origin: Coordinate,
        radius_km: Option<f64>,
        settings: &NearbySettings,
    ) -> Result<Self, HubError> {
        let radius = radius_km.unwrap_or(settings.default_radius_km);
        if !radius.is_finite() || radius <= 0.0 {
            return Err(HubError::InvalidArgument(format!(
                "radius must be a positive number of kilometres, got {radius}"
            )));
        }
        Ok(Self {
            origin,
            radius_km: radius.min(settings.max_radius_km),
        })
    }

    /// Parses the raw string parameters of an HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidArgument`] when latitude or longitude is
    /// missing, non-numeric or out of range, or when the radius is
    /// present but invalid.
    pub fn parse(
        latitude: Option<&str>,
        longitude: Option<&str>,
        radius: Option<&str>,
        settings: &NearbySettings,
    ) -> Result<Self, HubError> {
        let lat = parse_number("latitude", latitude)?
            .ok_or_else(|| HubError::InvalidArgument("latitude is required".to_string()))?;
        let lon = parse_number("longitude", longitude)?
            .ok_or_else(|| HubError::InvalidArgument("longitude is required".to_string()))?;
        let radius = parse_number("radius", radius)?;
        Self::new(Coordinate::new(lat, lon)?, radius, settings)
    }
}

/// Parses an optional numeric parameter. Blank strings count as absent.
fn parse_number(field: &str, raw: Option<&str>) -> Result<Option<f64>, HubError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let value: f64 = raw
        .parse()
        .map_err(|_| HubError::InvalidArgument(format!("{field} must be a number, got {raw:?}")))?;
    if !value.is_finite() {
        return Err(HubError::InvalidArgument(format!(
            "{field} must be a finite number, got {raw:?}"
        )));
    }
    Ok(Some(value))
}

/// An event annotated with its distance from the requesting user.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NearbyEvent {
    /// The stored event record.
    #[serde(flatten)]
    pub event: Event,
    /// Great-circle distance from the user, in kilometres.
    pub distance: f64,
}

/// Ranks `candidates` by distance from the query origin.
///
/// Candidates must arrive in load order (start date ascending); events
/// at equal distance keep that order. Events failing the eligibility
/// check at `now`, or carrying unusable coordinates, are skipped.
#[must_use]
pub fn rank_nearby(
    query: &NearbyQuery,
    limit: usize,
    now: DateTime<Utc>,
    candidates: Vec<Event>,
) -> Vec<NearbyEvent> {
    let origin = query.origin;
    let band = SearchBand::new(origin.latitude(), origin.longitude(), query.radius_km);

    let mut ranked: Vec<NearbyEvent> = candidates
        .into_iter()
        .filter(|event| event.is_nearby_candidate(now))
        .filter_map(|event| {
            let position = event.coordinate()?;
            if !band.may_contain(position.latitude(), position.longitude()) {
                return None;
            }
            let distance = origin.distance_km(&position);
            (distance <= query.radius_km).then_some(NearbyEvent { event, distance })
        })
        .collect();

    // `sort_by` is stable; distances are finite so `total_cmp` matches `<`.
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(limit);
    ranked
}
